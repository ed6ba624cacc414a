use serde::{Deserialize, Serialize};

/// JSON error envelope returned by every failing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(status_code: u16, error: impl Into<String>, message: Option<String>) -> Self {
        Self { status_code, error: error.into(), message }
    }
}

/// Row counter payload, e.g. the result of a bulk unlink.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Count {
    pub count: u64,
}
