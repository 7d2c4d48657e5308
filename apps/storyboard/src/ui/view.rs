//! Derived view model. Everything here is a pure function of
//! [`StoryboardState`]; nothing is cached between renders.

use shared::protocol::{Chapter, RecapMetrics, RecapResponse, TimelineItem};

use crate::controller::reducer::{RecapForm, StoryboardState};

pub const INVITATION_SUBTITLE: &str = "Turn your GitHub trail into a clean, shareable recap.";
pub const EMPTY_STATE_TITLE: &str = "Your storyboard will appear here.";
pub const EMPTY_STATE_BODY: &str =
    "The recap blends GitHub activity with local notes to craft a narrative arc.";
pub const SUBMIT_LABEL: &str = "Generate recap";
pub const SUBMIT_LABEL_LOADING: &str = "Drafting recap...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView<'a> {
    pub repo: &'a str,
    pub since: &'a str,
    pub until: &'a str,
    pub token_set: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner<'a> {
    pub message: &'a str,
    pub hint: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryboardPanels<'a> {
    pub headline: &'a str,
    pub caption: String,
    pub metrics: RecapMetrics,
    pub highlights: &'a [String],
    pub risks: &'a [String],
    pub next: &'a [String],
    pub chapters: &'a [Chapter],
    pub timeline: &'a [TimelineItem],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryboardView<'a> {
    pub subtitle: String,
    pub form: FormView<'a>,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub error_banner: Option<ErrorBanner<'a>>,
    /// `None` until the first recap arrives; shown regardless of status.
    pub storyboard: Option<StoryboardPanels<'a>>,
}

pub fn subtitle(result: Option<&RecapResponse>) -> String {
    match result {
        None => INVITATION_SUBTITLE.to_string(),
        Some(recap) => format!(
            "{} PRs, {} commits, {} notes.",
            recap.metrics.pr_count, recap.metrics.commit_count, recap.metrics.note_count
        ),
    }
}

fn form_view(form: &RecapForm) -> FormView<'_> {
    FormView {
        repo: &form.repo,
        since: &form.since,
        until: &form.until,
        token_set: !form.github_token.trim().is_empty(),
    }
}

fn panels(recap: &RecapResponse) -> StoryboardPanels<'_> {
    StoryboardPanels {
        headline: &recap.summary.headline,
        caption: format!(
            "{} · {} to {}",
            recap.project.title, recap.range.since, recap.range.until
        ),
        metrics: recap.metrics,
        highlights: &recap.summary.highlights,
        risks: &recap.summary.risks,
        next: &recap.summary.next,
        chapters: &recap.chapters,
        timeline: &recap.timeline,
    }
}

pub fn derive_view(state: &StoryboardState) -> StoryboardView<'_> {
    let result = state.last_result();
    let loading = state.is_loading();
    StoryboardView {
        subtitle: subtitle(result),
        form: form_view(&state.form),
        submit_label: if loading {
            SUBMIT_LABEL_LOADING
        } else {
            SUBMIT_LABEL
        },
        submit_disabled: loading,
        error_banner: state.error().map(|error| ErrorBanner {
            message: error.message(),
            hint: error.hint(),
        }),
        storyboard: result.map(panels),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
