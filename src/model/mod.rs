pub mod config;
pub mod project;
pub mod task;

pub use config::*;
pub use project::*;
pub use task::*;
