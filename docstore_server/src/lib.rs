pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::{AppState, app};
