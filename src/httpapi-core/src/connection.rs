//! Transport contracts consumed by HttpApi plugins.
//!
//! The host runtime owns the actual HTTP machinery (pooling, TLS, cookies,
//! timeouts) and hands plugins a [`Connection`]. Plugins never implement
//! these traits themselves.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConnectionError;

/// Request and auth headers exchanged with the transport.
pub type Headers = BTreeMap<String, String>;

/// Minimal view of a completed HTTP response owned by the host transport.
pub trait HttpResponse {
    /// HTTP status code of the response.
    fn status_code(&self) -> u16;

    /// Look up a response header by name. Case-insensitive matching is the
    /// implementor's concern.
    fn header(&self, name: &str) -> Option<&str>;

    /// Whether this response carries an HTTP error status.
    fn is_error(&self) -> bool {
        self.status_code() >= 400
    }
}

/// Transport connection supplied by the host runtime.
///
/// All session state, including the cached auth material, lives behind the
/// connection; plugins only call through it.
pub trait Connection {
    /// Perform one HTTP exchange and return the response together with its
    /// fully drained body.
    fn send(
        &self,
        path: &str,
        payload: &[u8],
        headers: &Headers,
        method: Option<&str>,
    ) -> Result<(Box<dyn HttpResponse>, Vec<u8>), ConnectionError>;

    /// Host-held option such as `remote_user` or `password`.
    fn get_option(&self, name: &str) -> Option<String>;

    /// Whether the connection currently holds cached auth material.
    fn has_auth(&self) -> bool;

    /// Drop the cached auth material.
    fn clear_auth(&self);
}

/// HTTP failure object surfaced by the transport and routed through
/// [`HttpApi::handle_httperror`](crate::httpapi::HttpApi::handle_httperror).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub code: u16,
    pub message: String,
}

impl HttpError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP error {}: {}", self.code, self.message)
    }
}
