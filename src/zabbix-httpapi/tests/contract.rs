use httpapi_core::contract::{run_httpapi_contract, HttpApiContractSpec, RequestExpectation};
use httpapi_core::{
    Connection, ConnectionError, Headers, HttpResponse, Payload, RequestOptions,
};
use serde_json::json;
use std::sync::Mutex;
use zabbix_httpapi::ZabbixHttpApi;

struct MockResponse {
    code: u16,
    headers: Headers,
}

impl HttpResponse for MockResponse {
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

/// Replays one scripted exchange for every send, tracking the host-owned
/// auth flag the way the runtime's connection would.
struct MockConnection {
    auth: Mutex<bool>,
    status: u16,
    body: Vec<u8>,
}

impl MockConnection {
    fn new(authed: bool, status: u16, body: &[u8]) -> Self {
        Self {
            auth: Mutex::new(authed),
            status,
            body: body.to_vec(),
        }
    }
}

impl Connection for MockConnection {
    fn send(
        &self,
        _path: &str,
        _payload: &[u8],
        _headers: &Headers,
        _method: Option<&str>,
    ) -> Result<(Box<dyn HttpResponse>, Vec<u8>), ConnectionError> {
        let response = MockResponse {
            code: self.status,
            headers: Headers::new(),
        };
        Ok((Box::new(response), self.body.clone()))
    }

    fn get_option(&self, name: &str) -> Option<String> {
        match name {
            "remote_user" => Some("Admin".to_string()),
            "password" => Some("zabbix".to_string()),
            _ => None,
        }
    }

    fn has_auth(&self) -> bool {
        *self.auth.lock().unwrap()
    }

    fn clear_auth(&self) {
        *self.auth.lock().unwrap() = false;
    }
}

#[test]
fn zabbix_httpapi_contract() {
    let body = br#"{"jsonrpc":"2.0","result":["templateid"],"id":1}"#;
    let authed = MockConnection::new(true, 200, body);
    let anonymous = MockConnection::new(false, 200, body);
    let plugin = ZabbixHttpApi::with_root_path("/api_jsonrpc.php");

    let spec = HttpApiContractSpec {
        plugin: &plugin,
        authed: &authed,
        anonymous: &anonymous,
        request: RequestExpectation {
            payload: br#"{"jsonrpc":"2.0","method":"template.get","params":{},"id":1}"#.to_vec(),
            options: RequestOptions {
                method: Some("POST".into()),
                ..Default::default()
            },
            expected: Payload::Json(json!({
                "jsonrpc": "2.0",
                "result": ["templateid"],
                "id": 1,
            })),
        },
    };

    if let Err(e) = run_httpapi_contract(&spec) {
        panic!("contract test failed: {e}");
    }
}

#[test]
fn error_responses_fail_the_contract_request() {
    let body = br#"{"errors":{"error":[{"error-message":"Not authorised"}]}}"#;
    let authed = MockConnection::new(true, 200, b"{}");
    let anonymous = MockConnection::new(false, 403, body);
    let plugin = ZabbixHttpApi::with_root_path("/api_jsonrpc.php");

    let spec = HttpApiContractSpec {
        plugin: &plugin,
        authed: &authed,
        anonymous: &anonymous,
        request: RequestExpectation {
            payload: b"{}".to_vec(),
            options: RequestOptions::default(),
            expected: Payload::Json(json!({})),
        },
    };

    let err = run_httpapi_contract(&spec).unwrap_err();
    assert!(
        err.to_string().contains("Not authorised"),
        "expected the normalized error to surface, got: {err}"
    );
}
