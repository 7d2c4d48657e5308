use super::*;
use crate::controller::events::UiErrorCategory;
use shared::protocol::RecapMetrics;

fn octo_form(token: &str) -> RecapForm {
    RecapForm {
        repo: "octo/demo".to_string(),
        since: "2025-01-01".to_string(),
        until: "2025-01-31".to_string(),
        github_token: token.to_string(),
    }
}

fn recap(prs: u64) -> RecapResponse {
    RecapResponse {
        metrics: RecapMetrics {
            pr_count: prs,
            commit_count: 0,
            note_count: 0,
        },
        ..RecapResponse::default()
    }
}

fn boom() -> UiError {
    UiError::new(UiErrorCategory::Server, "boom")
}

#[test]
fn starts_idle_with_default_form() {
    let state = StoryboardState::default();
    assert_eq!(state.status(), &RecapStatus::Idle);
    assert_eq!(state.form.repo, DEFAULT_REPO);
    assert_eq!(state.form.since, DEFAULT_SINCE);
    assert_eq!(state.form.until.len(), 10);
    assert!(state.form.github_token.is_empty());
    assert_eq!(state.latest_submission(), None);
}

#[test]
fn submit_snapshots_form_without_empty_token() {
    let mut state = StoryboardState::with_form(octo_form("   "));
    let submission = state.submit();

    assert!(state.is_loading());
    assert_eq!(submission.id, 1);
    assert_eq!(submission.request.repo, "octo/demo");
    assert_eq!(submission.request.since, "2025-01-01");
    assert_eq!(submission.request.until, "2025-01-31");
    assert_eq!(submission.request.github_token, None);
}

#[test]
fn submit_trims_token() {
    let mut state = StoryboardState::with_form(octo_form(" ghp_abc "));
    let submission = state.submit();
    assert_eq!(submission.request.github_token.as_deref(), Some("ghp_abc"));
}

#[test]
fn success_stores_response() {
    let mut state = StoryboardState::with_form(octo_form(""));
    let submission = state.submit();
    state.apply(UiEvent::RecapReady {
        submission: submission.id,
        recap: recap(5),
    });
    assert_eq!(state.status(), &RecapStatus::Success(recap(5)));
    assert_eq!(state.last_result(), Some(&recap(5)));
}

#[test]
fn new_result_replaces_previous_entirely() {
    let mut state = StoryboardState::with_form(octo_form(""));
    let first = state.submit();
    let mut old = recap(1);
    old.source_notes = vec!["old note".to_string()];
    state.apply(UiEvent::RecapReady {
        submission: first.id,
        recap: old,
    });

    let second = state.submit();
    state.apply(UiEvent::RecapReady {
        submission: second.id,
        recap: recap(2),
    });
    let result = state.last_result().expect("result");
    assert_eq!(result.metrics.pr_count, 2);
    assert!(result.source_notes.is_empty());
}

#[test]
fn failure_sets_message_and_keeps_previous_result() {
    let mut state = StoryboardState::with_form(octo_form(""));
    let first = state.submit();
    state.apply(UiEvent::RecapReady {
        submission: first.id,
        recap: recap(3),
    });

    let second = state.submit();
    assert_eq!(state.last_result(), Some(&recap(3)), "refresh keeps storyboard");
    state.apply(UiEvent::RecapFailed {
        submission: second.id,
        error: boom(),
    });

    assert_eq!(state.error().map(UiError::message), Some("boom"));
    assert!(!state.is_loading());
    assert_eq!(state.last_result(), Some(&recap(3)));
}

#[test]
fn resubmitting_clears_previous_error() {
    let mut state = StoryboardState::with_form(octo_form(""));
    let first = state.submit();
    state.apply(UiEvent::RecapFailed {
        submission: first.id,
        error: boom(),
    });
    assert!(state.error().is_some());

    state.submit();
    assert!(state.error().is_none());
    assert!(state.is_loading());
}

#[test]
fn editing_never_changes_status() {
    let mut state = StoryboardState::with_form(octo_form(""));
    state.edit(FormField::Repo, "octo/other");
    assert_eq!(state.status(), &RecapStatus::Idle);

    let submission = state.submit();
    state.edit(FormField::Since, "2024-01-01");
    state.edit(FormField::GithubToken, "ghp_late");
    assert!(state.is_loading());
    assert_eq!(submission.request.since, "2025-01-01");
    assert_eq!(submission.request.github_token, None);
    assert_eq!(state.form.since, "2024-01-01");
}

#[test]
fn no_transition_back_to_idle() {
    let mut state = StoryboardState::with_form(octo_form(""));
    let submission = state.submit();
    state.apply(UiEvent::RecapFailed {
        submission: submission.id,
        error: boom(),
    });
    assert_ne!(state.status(), &RecapStatus::Idle);
    assert_eq!(state.last_result(), None);
}

#[test]
fn later_submission_wins_when_it_resolves_first() {
    let mut state = StoryboardState::with_form(octo_form(""));
    let first = state.submit();
    let second = state.submit();

    state.apply(UiEvent::RecapReady {
        submission: second.id,
        recap: recap(2),
    });
    state.apply(UiEvent::RecapReady {
        submission: first.id,
        recap: recap(1),
    });

    assert_eq!(state.last_result(), Some(&recap(2)));
    assert_eq!(state.latest_submission(), Some(second.id));
}

#[test]
fn stale_completion_does_not_end_loading() {
    let mut state = StoryboardState::with_form(octo_form(""));
    let first = state.submit();
    let second = state.submit();

    state.apply(UiEvent::RecapFailed {
        submission: first.id,
        error: boom(),
    });
    assert!(state.is_loading());
    assert!(state.error().is_none());

    state.apply(UiEvent::RecapReady {
        submission: second.id,
        recap: recap(4),
    });
    assert_eq!(state.status(), &RecapStatus::Success(recap(4)));
}

#[test]
fn form_debug_hides_token() {
    let rendered = format!("{:?}", octo_form("ghp_secret"));
    assert!(!rendered.contains("ghp_secret"));
    assert!(rendered.contains("github_token_set: true"));
}
