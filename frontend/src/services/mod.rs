pub mod api;
pub mod config;
pub mod download;
pub mod logging;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use config::ConsoleConfig;
pub use logging::Logger;
