pub mod config_io;
pub mod repository;
pub mod state;
pub mod store;
