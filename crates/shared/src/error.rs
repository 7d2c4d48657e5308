use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when a failed response carries no text of its own.
pub const GENERIC_REQUEST_FAILURE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("malformed recap response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Rejection body emitted by the recap backend (`{"detail": "..."}`).
/// Clients surface the raw text instead of parsing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

impl ApiErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Picks the user-facing message for a failed response body.
pub fn failure_message(body: &str) -> String {
    if body.trim().is_empty() {
        GENERIC_REQUEST_FAILURE.to_string()
    } else {
        body.to_string()
    }
}
