use crate::connection::{Connection, Headers, HttpError, HttpResponse};
use crate::error::ConnectionError;
use crate::httpapi::{ErrorDisposition, HttpApi, Payload, RequestOptions};
use thiserror::Error;

/// Expectations supplied by an adapter implementation to run the shared
/// contract suite.
pub struct HttpApiContractSpec<'a, P: HttpApi> {
    pub plugin: &'a P,
    /// Connection that currently holds cached auth material.
    pub authed: &'a dyn Connection,
    /// Connection without any cached auth.
    pub anonymous: &'a dyn Connection,
    /// Request driven through `send_request` against the anonymous
    /// connection, with the payload the adapter is expected to produce.
    pub request: RequestExpectation,
}

/// A scripted request and the payload it must yield.
pub struct RequestExpectation {
    pub payload: Vec<u8>,
    pub options: RequestOptions,
    pub expected: Payload,
}

/// Errors surfaced by the HttpApi contract harness.
#[derive(Debug, Error)]
pub enum HttpApiContractError {
    #[error("login hook failed: {0}")]
    LoginFailed(ConnectionError),
    #[error("logout hook failed: {0}")]
    LogoutFailed(ConnectionError),
    #[error("401 with stored auth must signal a retry, got {got}")]
    RetryExpected { got: String },
    #[error("stored auth was not cleared on the 401 retry path")]
    AuthNotCleared,
    #[error("401 without stored auth must be unrecoverable, got {got}")]
    UnrecoverableExpected { got: String },
    #[error("non-auth error must pass through unchanged, got {got}")]
    PassThroughExpected { got: String },
    #[error("update_auth must map Set-Cookie into a Cookie header")]
    CookieNotMapped,
    #[error("update_auth must report no credential when Set-Cookie is absent")]
    UnexpectedCredential,
    #[error("send_request failed: {0}")]
    RequestFailed(ConnectionError),
    #[error("send_request returned the wrong payload: expected {expected:?}, got {actual:?}")]
    WrongPayload { expected: Payload, actual: Payload },
}

/// Run the shared HttpApi contract suite against an adapter implementation.
///
/// Adapters should call this from their crate-level tests with scripted
/// connections that replay known transport exchanges.
pub fn run_httpapi_contract<P: HttpApi>(
    spec: &HttpApiContractSpec<'_, P>,
) -> Result<(), HttpApiContractError> {
    verify_noop_hooks(spec)?;
    verify_auth_recovery(spec)?;
    verify_update_auth(spec.plugin)?;
    verify_request(spec)?;
    Ok(())
}

fn verify_noop_hooks<P: HttpApi>(
    spec: &HttpApiContractSpec<'_, P>,
) -> Result<(), HttpApiContractError> {
    spec.plugin
        .login(spec.anonymous, "user", "password")
        .map_err(HttpApiContractError::LoginFailed)?;
    spec.plugin
        .logout(spec.anonymous)
        .map_err(HttpApiContractError::LogoutFailed)?;
    Ok(())
}

fn verify_auth_recovery<P: HttpApi>(
    spec: &HttpApiContractSpec<'_, P>,
) -> Result<(), HttpApiContractError> {
    let unauthorized = HttpError::new(401, "Unauthorized");

    match spec
        .plugin
        .handle_httperror(spec.authed, unauthorized.clone())
    {
        ErrorDisposition::Retry => {}
        other => {
            return Err(HttpApiContractError::RetryExpected {
                got: format!("{other:?}"),
            })
        }
    }
    if spec.authed.has_auth() {
        return Err(HttpApiContractError::AuthNotCleared);
    }

    match spec
        .plugin
        .handle_httperror(spec.anonymous, unauthorized)
    {
        ErrorDisposition::Unrecoverable => {}
        other => {
            return Err(HttpApiContractError::UnrecoverableExpected {
                got: format!("{other:?}"),
            })
        }
    }

    let forbidden = HttpError::new(403, "Forbidden");
    match spec
        .plugin
        .handle_httperror(spec.anonymous, forbidden.clone())
    {
        ErrorDisposition::Response(returned) if returned == forbidden => Ok(()),
        other => Err(HttpApiContractError::PassThroughExpected {
            got: format!("{other:?}"),
        }),
    }
}

fn verify_update_auth<P: HttpApi>(plugin: &P) -> Result<(), HttpApiContractError> {
    let mut headers = Headers::new();
    headers.insert("Set-Cookie".to_string(), "zbx_session=abc123".to_string());
    let response = HeaderResponse { code: 200, headers };

    match plugin.update_auth(&response, "") {
        Some(auth) if auth.get("Cookie").map(String::as_str) == Some("zbx_session=abc123") => {}
        _ => return Err(HttpApiContractError::CookieNotMapped),
    }

    let bare = HeaderResponse {
        code: 200,
        headers: Headers::new(),
    };
    if plugin.update_auth(&bare, "").is_some() {
        return Err(HttpApiContractError::UnexpectedCredential);
    }

    Ok(())
}

fn verify_request<P: HttpApi>(
    spec: &HttpApiContractSpec<'_, P>,
) -> Result<(), HttpApiContractError> {
    let actual = spec
        .plugin
        .send_request(
            spec.anonymous,
            &spec.request.payload,
            &spec.request.options,
        )
        .map_err(HttpApiContractError::RequestFailed)?;

    if actual != spec.request.expected {
        return Err(HttpApiContractError::WrongPayload {
            expected: spec.request.expected.clone(),
            actual,
        });
    }

    Ok(())
}

/// Response fixture used by the harness for the `update_auth` checks.
struct HeaderResponse {
    code: u16,
    headers: Headers,
}

impl HttpResponse for HeaderResponse {
    fn status_code(&self) -> u16 {
        self.code
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
