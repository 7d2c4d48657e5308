use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar date format used on the wire for `since` / `until`.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    Pr,
    Commit,
    Note,
    #[default]
    #[serde(other)]
    Other,
}

impl TimelineKind {
    pub fn as_tag(self) -> &'static str {
        match self {
            TimelineKind::Pr => "pr",
            TimelineKind::Commit => "commit",
            TimelineKind::Note => "note",
            TimelineKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRef {
    pub repo: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub since: String,
    pub until: String,
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Today's local calendar date as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    format_iso_date(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_kind_uses_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&TimelineKind::Commit).expect("serialize"),
            "\"commit\""
        );
        let parsed: TimelineKind = serde_json::from_str("\"pr\"").expect("parse");
        assert_eq!(parsed, TimelineKind::Pr);
    }

    #[test]
    fn unknown_timeline_tag_maps_to_other() {
        let parsed: TimelineKind = serde_json::from_str("\"release\"").expect("parse");
        assert_eq!(parsed, TimelineKind::Other);
        assert_eq!(parsed.as_tag(), "other");
    }

    #[test]
    fn formats_dates_as_iso_calendar_days() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).expect("date");
        assert_eq!(format_iso_date(date), "2025-01-09");
        assert_eq!(today_iso().len(), 10);
    }
}
