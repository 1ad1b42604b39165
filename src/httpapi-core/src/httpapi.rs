//! The HttpApi plugin contract.
//!
//! A plugin adapts one remote HTTP API for the host runtime: it composes
//! request paths and headers, forwards the exchange to the host-owned
//! [`Connection`], and normalizes responses. The host drives the hooks from
//! its own connection lifecycle; a plugin never loops or retries internally.

use crate::connection::{Connection, Headers, HttpError, HttpResponse};
use crate::error::ConnectionError;

/// Default media type for request and response bodies.
pub const MEDIA_TYPE: &str = "application/json";

/// Per-call request descriptor. Created for one call, discarded after it.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Sub-path under the plugin's configured root. Leading and trailing
    /// separators carry no meaning; the plugin normalizes both ends.
    pub path: Option<String>,
    /// HTTP method, passed through to the transport untouched.
    pub method: Option<String>,
    /// Per-call `Content-Type` override.
    pub content_type: Option<String>,
    /// Per-call `Accept` override.
    pub accept: Option<String>,
}

/// Parsed result of a completed call.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body decoded as JSON.
    Json(serde_json::Value),
    /// Body kept as raw text after a failed JSON decode.
    Text(String),
}

impl Payload {
    /// Empty means: JSON null, an empty JSON object, an empty JSON string,
    /// or empty raw text. Any other decoded value, bare scalars included,
    /// counts as a usable payload.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Json(serde_json::Value::Null) => true,
            Payload::Json(serde_json::Value::Object(map)) => map.is_empty(),
            Payload::Json(serde_json::Value::String(s)) => s.is_empty(),
            Payload::Json(_) => false,
            Payload::Text(s) => s.is_empty(),
        }
    }
}

/// Decision returned from [`HttpApi::handle_httperror`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// The request may be resent unchanged.
    Retry,
    /// Not recoverable here; the caller surfaces the original error.
    Unrecoverable,
    /// Treat the error as a valid response without another request.
    Response(HttpError),
}

/// The five hooks the host runtime invokes on a loaded HttpApi plugin.
///
/// `send_request` is protocol-specific and always implemented by the
/// adapter. The remaining hooks carry the base behavior of the host
/// framework; adapters override them only where the remote API deviates.
pub trait HttpApi {
    /// Compose the request, forward it through the connection, and
    /// normalize the response. Performs exactly one network call.
    fn send_request(
        &self,
        conn: &dyn Connection,
        payload: &[u8],
        options: &RequestOptions,
    ) -> Result<Payload, ConnectionError>;

    /// Extract a reusable per-request credential from a completed response.
    ///
    /// Returns a single-entry mapping to merge into future request headers,
    /// or `None` when the response carries no credential. `None` is distinct
    /// from an empty mapping: it tells the host to inject nothing.
    fn update_auth(
        &self,
        response: &dyn HttpResponse,
        _response_text: &str,
    ) -> Option<Headers> {
        let cookie = response.header("Set-Cookie")?;
        let mut auth = Headers::new();
        auth.insert("Cookie".to_string(), cookie.to_string());
        Some(auth)
    }

    /// Exchange basic credentials for a reusable session token, for APIs
    /// with a dedicated login endpoint. Must not fail when unsupported.
    fn login(
        &self,
        _conn: &dyn Connection,
        _username: &str,
        _password: &str,
    ) -> Result<(), ConnectionError> {
        Ok(())
    }

    /// Revoke a previously granted token server-side. Must not fail when
    /// unsupported.
    fn logout(&self, _conn: &dyn Connection) -> Result<(), ConnectionError> {
        Ok(())
    }

    /// Decide what the host's call loop does with an HTTP error.
    ///
    /// A 401 with stored auth clears the stale credential, re-runs `login`
    /// with the host-configured user and password, and asks for a single
    /// resend. A 401 without stored auth cannot be recovered here. Every
    /// other status passes through for the caller to interpret.
    fn handle_httperror(&self, conn: &dyn Connection, error: HttpError) -> ErrorDisposition {
        if error.code == 401 {
            if conn.has_auth() {
                // Stored auth appears to be stale: clear it and retry once.
                conn.clear_auth();
                tracing::warn!(code = error.code, "clearing cached auth before resend");
                let username = conn.get_option("remote_user").unwrap_or_default();
                let password = conn.get_option("password").unwrap_or_default();
                if let Err(err) = self.login(conn, &username, &password) {
                    tracing::debug!(error = %err, "re-login failed; the resend will surface it");
                }
                return ErrorDisposition::Retry;
            }
            // Unauthorized and no token to refresh.
            return ErrorDisposition::Unrecoverable;
        }

        ErrorDisposition::Response(error)
    }
}
