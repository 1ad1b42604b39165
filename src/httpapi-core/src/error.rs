use thiserror::Error;

/// Uniform failure surface exposed to the host caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    /// Normalized HTTP/protocol failure carrying the original status code.
    #[error("{message}")]
    Api { message: String, code: u16 },
    /// Failure raised by the transport before any response existed.
    #[error("network error: {message}")]
    Network { message: String },
}

impl ConnectionError {
    pub fn api(message: impl Into<String>, code: u16) -> Self {
        Self::Api {
            message: message.into(),
            code,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Status code preserved from the response, when one exists.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::Network { .. } => None,
        }
    }
}
