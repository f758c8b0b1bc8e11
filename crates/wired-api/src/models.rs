//! Response models for the web API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Platform status envelope.
///
/// Success renders as `{"status":"success"}`; failures render as
/// `{"status":"error","message":"<text>"}` with HTTP 500.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
        }
    }
}

/// One registered mod, as shown in the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModSummary {
    pub name: String,
    pub description: String,
    /// Content-type tag expected by save/do payloads.
    pub accepts: String,
    #[serde(rename = "restartRequired")]
    pub restart_required: bool,
    /// Baseline configuration for pre-populating clients.
    pub default: Value,
}
