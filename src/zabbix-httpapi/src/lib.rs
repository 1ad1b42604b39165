//! HttpApi adapter for the Zabbix JSON-RPC endpoint.
//!
//! This crate provides:
//! - [`ZabbixHttpApi`], an [`HttpApi`] plugin that composes request paths
//!   under a configurable API root, applies JSON media-type headers, and
//!   forwards the exchange to the host-owned [`Connection`]
//! - [`handle_response`], which normalizes transport responses into either a
//!   parsed payload or a uniform connection failure
//!
//! The adapter owns no session state. Auth caching, cookies, pooling, and
//! the single resend after a recovered 401 all belong to the host runtime;
//! the plugin only signals intent through the [`HttpApi`] hooks.
//!
//! # Usage
//!
//! ```rust,ignore
//! use httpapi_core::{HttpApi, PluginSettings, RequestOptions};
//! use zabbix_httpapi::ZabbixHttpApi;
//!
//! let settings = PluginSettings::default();
//! let plugin = ZabbixHttpApi::new(&settings);
//! let payload = plugin.send_request(&conn, body, &RequestOptions::default())?;
//! ```

mod models;
mod response;

pub use response::handle_response;

use httpapi_core::{
    Connection, ConnectionError, Headers, HttpApi, Payload, PluginSettings, RequestOptions,
    MEDIA_TYPE,
};

/// HttpApi plugin for Zabbix JSON-RPC.
///
/// Holds only the configured API root; everything else is passed in per
/// call. Zabbix has no dedicated login endpoint, so the base `login`,
/// `logout`, `update_auth`, and `handle_httperror` hooks apply unchanged:
/// session auth rides inside the JSON-RPC payload, and the only recovery
/// this adapter asks for is a single resend after a stale 401.
pub struct ZabbixHttpApi {
    root_path: String,
}

impl ZabbixHttpApi {
    pub fn new(settings: &PluginSettings) -> Self {
        Self {
            root_path: settings.resolved_root_path(),
        }
    }

    pub fn with_root_path(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    /// API root this adapter dispatches under.
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Join the configured root and the per-call sub-path with exactly one
    /// separator. An absent sub-path joins against the empty string, so the
    /// composed path then ends with the separator.
    fn compose_path(&self, sub_path: Option<&str>) -> String {
        format!(
            "{}/{}",
            self.root_path.trim_end_matches('/'),
            sub_path.unwrap_or_default().trim_start_matches('/')
        )
    }

    fn build_headers(options: &RequestOptions) -> Headers {
        let mut headers = Headers::new();
        headers.insert(
            "Content-Type".to_string(),
            options
                .content_type
                .clone()
                .unwrap_or_else(|| MEDIA_TYPE.to_string()),
        );
        headers.insert(
            "Accept".to_string(),
            options
                .accept
                .clone()
                .unwrap_or_else(|| MEDIA_TYPE.to_string()),
        );
        headers
    }
}

impl HttpApi for ZabbixHttpApi {
    fn send_request(
        &self,
        conn: &dyn Connection,
        payload: &[u8],
        options: &RequestOptions,
    ) -> Result<Payload, ConnectionError> {
        let path = self.compose_path(options.path.as_deref());
        let headers = Self::build_headers(options);

        tracing::debug!(
            path = %path,
            method = options.method.as_deref().unwrap_or("<transport default>"),
            "dispatching JSON-RPC request"
        );

        let (response, body) = conn.send(&path, payload, &headers, options.method.as_deref())?;
        handle_response(response.as_ref(), &body)
    }
}
