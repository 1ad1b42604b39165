pub mod config;
pub mod connection;
pub mod contract;
pub mod error;
pub mod httpapi;
pub mod logging;

pub use config::{ConfigError, LogLevel, LoggingConfig, PluginSettings, ValidationError};
pub use connection::{Connection, Headers, HttpError, HttpResponse};
pub use error::ConnectionError;
pub use httpapi::{ErrorDisposition, HttpApi, Payload, RequestOptions, MEDIA_TYPE};
pub use logging::{init_logging, LoggingError};
