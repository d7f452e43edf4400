pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, LlmPlatform};
pub use error::NotewiseError;
pub type Result<T> = std::result::Result<T, NotewiseError>;
