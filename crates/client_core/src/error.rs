use shared::error::ContractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    /// The backend answered outside the 2xx range. `message` is the response
    /// body, or a generic fallback when the body was empty.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Decode(#[from] ContractError),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, RequestError::Network(_))
    }
}
