//! Plain-text rendering of a [`StoryboardView`] for the terminal.

use std::fmt::Write as _;

use crate::ui::view::{StoryboardPanels, StoryboardView, EMPTY_STATE_BODY, EMPTY_STATE_TITLE};

const EYEBROW: &str = "AI Project Recap Storyboard";
const RULE: &str = "------------------------------------------------------------";

pub fn render_view(view: &StoryboardView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{EYEBROW}");
    let _ = writeln!(out, "{}", view.subtitle);
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "Repository : {}", view.form.repo);
    let _ = writeln!(out, "Since      : {}", view.form.since);
    let _ = writeln!(out, "Until      : {}", view.form.until);
    let _ = writeln!(
        out,
        "GitHub PAT : {}",
        if view.form.token_set { "set (used only for this request)" } else { "none" }
    );
    let marker = if view.submit_disabled { " (busy)" } else { "" };
    let _ = writeln!(out, "[{}]{marker}", view.submit_label);

    if let Some(banner) = &view.error_banner {
        let _ = writeln!(out);
        let _ = writeln!(out, "! {}", banner.message);
        if let Some(hint) = banner.hint {
            let _ = writeln!(out, "  {hint}");
        }
    }

    let _ = writeln!(out, "{RULE}");
    match &view.storyboard {
        None => {
            let _ = writeln!(out, "{EMPTY_STATE_TITLE}");
            let _ = writeln!(out, "{EMPTY_STATE_BODY}");
        }
        Some(panels) => render_panels(&mut out, panels),
    }
    out
}

fn render_list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "{title}");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

fn render_panels(out: &mut String, panels: &StoryboardPanels<'_>) {
    let _ = writeln!(out, "{}", panels.headline);
    let _ = writeln!(out, "{}", panels.caption);
    let _ = writeln!(
        out,
        "PRs {} | Commits {} | Notes {}",
        panels.metrics.pr_count, panels.metrics.commit_count, panels.metrics.note_count
    );
    let _ = writeln!(out);

    render_list(out, "Highlights", panels.highlights);
    render_list(out, "Risks", panels.risks);
    render_list(out, "Next steps", panels.next);

    for chapter in panels.chapters {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", chapter.title);
        for (index, beat) in chapter.beats.iter().enumerate() {
            let _ = writeln!(out, "  {}. {beat}", index + 1);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Timeline");
    for item in panels.timeline {
        let _ = writeln!(out, "  [{}] {}", item.kind.as_tag(), item.title);
        if !item.detail.is_empty() {
            let _ = writeln!(out, "      {}", item.detail);
        }
        let _ = writeln!(out, "      {}", item.date);
    }
}
