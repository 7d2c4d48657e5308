//! Session state for the storyboard and the transitions that mutate it.

use std::mem;

use shared::{
    domain::today_iso,
    protocol::{RecapRequest, RecapResponse},
};

use crate::controller::events::{SubmissionId, UiError, UiEvent};

pub const DEFAULT_REPO: &str = "owner/repo";
pub const DEFAULT_SINCE: &str = "2025-12-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Repo,
    Since,
    Until,
    GithubToken,
}

/// Raw, free-text form values. Nothing here is validated client-side.
#[derive(Clone, PartialEq, Eq)]
pub struct RecapForm {
    pub repo: String,
    pub since: String,
    pub until: String,
    pub github_token: String,
}

impl Default for RecapForm {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            since: DEFAULT_SINCE.to_string(),
            until: today_iso(),
            github_token: String::new(),
        }
    }
}

impl std::fmt::Debug for RecapForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecapForm")
            .field("repo", &self.repo)
            .field("since", &self.since)
            .field("until", &self.until)
            .field("github_token_set", &!self.github_token.trim().is_empty())
            .finish()
    }
}

impl RecapForm {
    pub fn to_request(&self) -> RecapRequest {
        RecapRequest::from_form(&self.repo, &self.since, &self.until, &self.github_token)
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Repo => self.repo = value,
            FormField::Since => self.since = value,
            FormField::Until => self.until = value,
            FormField::GithubToken => self.github_token = value,
        }
    }
}

/// Submission status. The last received recap travels with `Loading` and
/// `Error` so a refresh or a failure never blanks the storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecapStatus {
    #[default]
    Idle,
    Loading {
        previous: Option<RecapResponse>,
    },
    Success(RecapResponse),
    Error {
        error: UiError,
        previous: Option<RecapResponse>,
    },
}

impl RecapStatus {
    pub fn last_result(&self) -> Option<&RecapResponse> {
        match self {
            RecapStatus::Idle => None,
            RecapStatus::Loading { previous } | RecapStatus::Error { previous, .. } => {
                previous.as_ref()
            }
            RecapStatus::Success(recap) => Some(recap),
        }
    }

    fn into_last_result(self) -> Option<RecapResponse> {
        match self {
            RecapStatus::Idle => None,
            RecapStatus::Loading { previous } | RecapStatus::Error { previous, .. } => previous,
            RecapStatus::Success(recap) => Some(recap),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub request: RecapRequest,
}

#[derive(Debug, Default)]
pub struct StoryboardState {
    pub form: RecapForm,
    status: RecapStatus,
    submission_seq: SubmissionId,
}

impl StoryboardState {
    pub fn with_form(form: RecapForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn status(&self) -> &RecapStatus {
        &self.status
    }

    pub fn last_result(&self) -> Option<&RecapResponse> {
        self.status.last_result()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, RecapStatus::Loading { .. })
    }

    pub fn error(&self) -> Option<&UiError> {
        match &self.status {
            RecapStatus::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Edits never touch the status, including while a request is in flight.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Snapshots the form into a request and enters `Loading`. Allowed from
    /// any status; an outstanding request is not cancelled.
    pub fn submit(&mut self) -> Submission {
        self.submission_seq += 1;
        let previous = self.take_status().into_last_result();
        self.status = RecapStatus::Loading { previous };
        Submission {
            id: self.submission_seq,
            request: self.form.to_request(),
        }
    }

    /// Applies a completion for the most recent submission. Completions of
    /// superseded submissions are dropped so a slow earlier response can
    /// never overwrite a newer one.
    pub fn apply(&mut self, event: UiEvent) {
        let submission = event.submission();
        if submission != self.submission_seq {
            tracing::debug!(
                submission,
                latest = self.submission_seq,
                "discarding stale recap completion"
            );
            return;
        }
        match event {
            UiEvent::RecapReady { recap, .. } => {
                tracing::debug!(submission, "recap applied");
                self.status = RecapStatus::Success(recap);
            }
            UiEvent::RecapFailed { error, .. } => {
                tracing::debug!(submission, category = ?error.category(), "recap failed");
                self.fail(error);
            }
        }
    }

    pub fn latest_submission(&self) -> Option<SubmissionId> {
        (self.submission_seq > 0).then_some(self.submission_seq)
    }

    pub fn fail(&mut self, error: UiError) {
        let previous = self.take_status().into_last_result();
        self.status = RecapStatus::Error { error, previous };
    }

    fn take_status(&mut self) -> RecapStatus {
        mem::take(&mut self.status)
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
