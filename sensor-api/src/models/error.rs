use serde::{Deserialize, Serialize};

/// Error body returned by the API on a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human readable reason
    pub detail: String,
}

impl ErrorDetail {
    pub fn new<S: Into<String>>(detail: S) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Reads `detail` out of a raw response body, if the body carries one.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}
