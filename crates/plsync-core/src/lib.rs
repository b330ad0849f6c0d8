pub mod config;
pub mod logging;

pub mod backend;
pub mod catalog;
pub mod error;
pub mod fetcher;
pub mod logger;
pub mod orchestrator;
pub mod presence;
pub mod sync;
pub mod workdir;

pub use error::SyncError;
