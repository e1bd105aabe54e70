pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod services;
pub mod state;

pub use config::Config;
pub use db::{Database, DbError, JobRecord, JobStore, JobType, NewJob};
pub use errors::{Result, ServerError};
pub use state::AppState;
