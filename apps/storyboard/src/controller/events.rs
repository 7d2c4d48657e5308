//! Backend-to-UI events and user-facing error modeling.

use client_core::RequestError;
use shared::protocol::RecapResponse;

/// Monotonic id handed out per submit; completions carry it back so the
/// reducer can tell the latest submission from superseded ones.
pub type SubmissionId = u64;

/// Shown when a failure carries no message of its own.
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

#[derive(Debug)]
pub enum UiEvent {
    RecapReady {
        submission: SubmissionId,
        recap: RecapResponse,
    },
    RecapFailed {
        submission: SubmissionId,
        error: UiError,
    },
}

impl UiEvent {
    pub fn submission(&self) -> SubmissionId {
        match self {
            UiEvent::RecapReady { submission, .. } | UiEvent::RecapFailed { submission, .. } => {
                *submission
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Rejected,
    Server,
    Malformed,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn new(category: UiErrorCategory, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNEXPECTED_ERROR.to_string()
        } else {
            message
        };
        Self { category, message }
    }

    pub fn from_request_error(err: &RequestError) -> Self {
        let category = match err {
            RequestError::Status { status: 401 | 403, .. } => UiErrorCategory::Auth,
            RequestError::Status { status, .. } if (400..500).contains(status) => {
                UiErrorCategory::Rejected
            }
            RequestError::Status { .. } => UiErrorCategory::Server,
            RequestError::Network(_) => UiErrorCategory::Transport,
            RequestError::Decode(_) => UiErrorCategory::Malformed,
        };
        Self::new(category, err.to_string())
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Short follow-up advice rendered under the banner, if any applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self.category {
            UiErrorCategory::Auth => {
                Some("The backend refused the credentials; check the GitHub token.")
            }
            UiErrorCategory::Transport => {
                Some("Recap backend unreachable; check the API base address and retry.")
            }
            UiErrorCategory::Malformed => {
                Some("The backend answered with something that is not a recap.")
            }
            UiErrorCategory::Rejected | UiErrorCategory::Server | UiErrorCategory::Unknown => None,
        }
    }
}
