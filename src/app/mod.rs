pub mod confirm;
pub mod notify;
pub mod state;
pub mod view;

pub use confirm::{AssumeYes, Confirm};
pub use notify::{Change, Snapshot, Subscriber};
pub use state::{AppState, Deletion};
pub use view::{View, ViewCoordinator};
