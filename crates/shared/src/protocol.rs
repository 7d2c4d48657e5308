use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{DateRange, ProjectRef, TimelineKind},
    error::ContractError,
};

/// Path of the recap generation endpoint, relative to the API base address.
pub const RECAP_ENDPOINT_PATH: &str = "/api/recap";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecapRequest {
    pub repo: String,
    pub since: String,
    pub until: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
}

impl RecapRequest {
    /// Builds a request from raw form values. The token is trimmed and
    /// dropped entirely when nothing is left.
    pub fn from_form(repo: &str, since: &str, until: &str, github_token: &str) -> Self {
        let token = github_token.trim();
        Self {
            repo: repo.to_string(),
            since: since.to_string(),
            until: until.to_string(),
            github_token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.github_token.is_some()
    }
}

impl fmt::Debug for RecapRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecapRequest")
            .field("repo", &self.repo)
            .field("since", &self.since)
            .field("until", &self.until)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecapSummary {
    pub headline: String,
    pub highlights: Vec<String>,
    pub risks: Vec<String>,
    pub next: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    pub title: String,
    pub beats: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineItem {
    pub date: String,
    pub title: String,
    pub detail: String,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecapMetrics {
    pub pr_count: u64,
    pub commit_count: u64,
    pub note_count: u64,
}

/// A generated recap. Missing fields decode to their empty value rather than
/// rejecting the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecapResponse {
    pub project: ProjectRef,
    pub range: DateRange,
    pub summary: RecapSummary,
    pub chapters: Vec<Chapter>,
    pub timeline: Vec<TimelineItem>,
    pub metrics: RecapMetrics,
    pub source_notes: Vec<String>,
}

impl RecapResponse {
    pub fn from_json_slice(body: &[u8]) -> Result<Self, ContractError> {
        serde_json::from_slice(body).map_err(ContractError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_without_token_omits_the_key() {
        let request = RecapRequest::from_form("octo/demo", "2025-01-01", "2025-01-31", "");
        let body = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            body,
            json!({"repo": "octo/demo", "since": "2025-01-01", "until": "2025-01-31"})
        );
    }

    #[test]
    fn whitespace_token_is_treated_as_absent() {
        let request = RecapRequest::from_form("octo/demo", "2025-01-01", "2025-01-31", "   \t");
        assert!(!request.is_authenticated());
        let body = serde_json::to_string(&request).expect("serialize");
        assert!(!body.contains("githubToken"));
    }

    #[test]
    fn token_is_trimmed_and_sent_in_camel_case() {
        let request = RecapRequest::from_form("octo/demo", "2025-01-01", "2025-01-31", " ghp_abc \n");
        let body = serde_json::to_value(&request).expect("serialize");
        assert_eq!(body["githubToken"], "ghp_abc");
    }

    #[test]
    fn debug_output_redacts_token() {
        let request = RecapRequest::from_form("octo/demo", "2025-01-01", "2025-01-31", "ghp_secret");
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn decodes_full_response() {
        let body = json!({
            "project": {"repo": "octo/demo", "title": "octo demo"},
            "range": {"since": "2025-01-01", "until": "2025-01-31"},
            "summary": {
                "headline": "Shipped 5 PRs and 12 commits across 31 days.",
                "highlights": ["Add login"],
                "risks": [],
                "next": ["Plan v2"]
            },
            "chapters": [{"title": "Act I", "beats": ["Kickoff", "Scope"]}],
            "timeline": [
                {"date": "2025-01-04", "title": "Add login", "detail": "https://x/1", "type": "pr"},
                {"date": "2025-01-03", "title": "fix", "detail": "abc123", "type": "commit"}
            ],
            "metrics": {"prCount": 5, "commitCount": 12, "noteCount": 3},
            "sourceNotes": ["Demo prep"]
        });
        let parsed = RecapResponse::from_json_slice(body.to_string().as_bytes()).expect("decode");
        assert_eq!(parsed.project.title, "octo demo");
        assert_eq!(parsed.metrics.commit_count, 12);
        assert_eq!(parsed.timeline[0].kind, TimelineKind::Pr);
        assert_eq!(parsed.chapters[0].beats, vec!["Kickoff", "Scope"]);
        assert_eq!(parsed.source_notes, vec!["Demo prep"]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let parsed = RecapResponse::from_json_slice(br#"{"summary": {"headline": "hi"}, "timeline": [{}]}"#)
            .expect("decode");
        assert_eq!(parsed.summary.headline, "hi");
        assert!(parsed.summary.highlights.is_empty());
        assert!(parsed.chapters.is_empty());
        assert_eq!(parsed.metrics, RecapMetrics::default());
        assert_eq!(parsed.timeline[0].kind, TimelineKind::Other);
    }

    #[test]
    fn non_json_body_is_a_contract_error() {
        let err = RecapResponse::from_json_slice(b"<html>oops</html>").expect_err("must fail");
        assert!(err.to_string().contains("recap response"));
    }

    #[test]
    fn negative_count_is_rejected() {
        let err = RecapResponse::from_json_slice(br#"{"metrics": {"prCount": -1}}"#)
            .expect_err("must fail");
        assert!(matches!(err, ContractError::MalformedResponse(_)));
    }
}
