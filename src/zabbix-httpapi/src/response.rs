//! Response normalization for the Zabbix JSON-RPC endpoint.

use crate::models::ErrorEnvelope;
use httpapi_core::{ConnectionError, HttpResponse, Payload};

/// Normalize a completed transport exchange into either a parsed payload or
/// a uniform connection failure.
///
/// The body is decoded as JSON when possible and kept as raw text otherwise.
/// A failing response surfaces exactly one error indication: the aggregated
/// messages of a structured error envelope, the raw payload, or, when the
/// body is empty, a rendering of the response itself. The original status
/// code is preserved in every case.
pub fn handle_response(
    response: &dyn HttpResponse,
    body: &[u8],
) -> Result<Payload, ConnectionError> {
    let payload = parse_body(body);
    if !response.is_error() {
        return Ok(payload);
    }

    let code = response.status_code();
    if payload.is_empty() {
        return Err(ConnectionError::api(format!("HTTP error {code}"), code));
    }

    let message = match &payload {
        // A bare JSON string surfaces its contents, not the quoted form.
        Payload::Json(serde_json::Value::String(text)) => text.clone(),
        Payload::Json(value) => {
            collect_error_messages(value).unwrap_or_else(|| value.to_string())
        }
        Payload::Text(text) => text.clone(),
    };
    Err(ConnectionError::api(message, code))
}

fn parse_body(body: &[u8]) -> Payload {
    match serde_json::from_slice(body) {
        Ok(value) => Payload::Json(value),
        Err(err) => {
            tracing::debug!(error = %err, "response body is not JSON, keeping raw text");
            Payload::Text(String::from_utf8_lossy(body).into_owned())
        }
    }
}

/// Join the `error-message` entries of a structured error envelope with
/// newlines, in order. Returns `None` when the body carries no `errors` key
/// or the envelope does not match the expected shape.
fn collect_error_messages(value: &serde_json::Value) -> Option<String> {
    if !value.as_object()?.contains_key("errors") {
        return None;
    }
    let envelope: ErrorEnvelope = serde_json::from_value(value.clone()).ok()?;
    Some(
        envelope
            .errors
            .error
            .iter()
            .map(|entry| entry.error_message.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
