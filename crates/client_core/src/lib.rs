use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use shared::{
    error::failure_message,
    protocol::{RecapRequest, RecapResponse},
};
use tracing::{info, warn};

pub mod config;
pub mod error;

pub use config::{load_settings, ClientSettings};
pub use error::RequestError;

/// Anything that can turn a [`RecapRequest`] into a recap.
///
/// The desktop front end only ever talks to this trait so the HTTP client can
/// be swapped for an in-memory fake.
#[async_trait]
pub trait RecapTransport: Send + Sync {
    async fn generate_recap(&self, request: &RecapRequest) -> Result<RecapResponse, RequestError>;
}

/// HTTP transport for the recap backend.
///
/// Every call issues exactly one `POST {api_base}/api/recap`; there is no
/// retry, caching or deduplication.
pub struct RecapClient {
    http: Client,
    recap_url: String,
}

impl RecapClient {
    pub fn new(settings: &ClientSettings) -> Self {
        Self::with_http_client(Client::new(), settings)
    }

    pub fn with_http_client(http: Client, settings: &ClientSettings) -> Self {
        Self {
            http,
            recap_url: settings.recap_url(),
        }
    }

    pub fn recap_url(&self) -> &str {
        &self.recap_url
    }
}

#[async_trait]
impl RecapTransport for RecapClient {
    async fn generate_recap(&self, request: &RecapRequest) -> Result<RecapResponse, RequestError> {
        info!(
            repo = %request.repo,
            since = %request.since,
            until = %request.until,
            authenticated = request.is_authenticated(),
            "requesting recap"
        );

        let res = self
            .http
            .post(&self.recap_url)
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!("recap request did not reach backend: {err}");
                RequestError::Network(err.to_string())
            })?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|err| RequestError::Network(err.to_string()))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            warn!(status = status.as_u16(), "recap backend rejected request");
            return Err(status_error(status, &text));
        }

        let recap = RecapResponse::from_json_slice(&body)?;
        info!(
            prs = recap.metrics.pr_count,
            commits = recap.metrics.commit_count,
            notes = recap.metrics.note_count,
            "recap received"
        );
        Ok(recap)
    }
}

fn status_error(status: StatusCode, body: &str) -> RequestError {
    RequestError::Status {
        status: status.as_u16(),
        message: failure_message(body),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
