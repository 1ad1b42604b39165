use serde::Deserialize;

/// Structured error body returned by the Zabbix endpoint on failed calls.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub errors: ErrorList,
}

#[derive(Debug, Deserialize)]
pub struct ErrorList {
    pub error: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEntry {
    #[serde(rename = "error-message")]
    pub error_message: String,
}
