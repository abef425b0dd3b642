use super::punch::{Layout, Punch};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// One employee's punches for one calendar day, as extracted from one or
/// more workbooks. Immutable once the merge stage has finalized it.
#[derive(Debug, Clone, Serialize)]
pub struct DayRecord {
    /// Raw employee token as read from the sheet (usually the badge id).
    pub employee_token: String,
    /// Best-effort display name; may be empty when the sheet omits it.
    pub display_name: String,
    pub department: Option<String>,
    pub date: NaiveDate,
    /// Punches ordered by minute of day.
    pub punches: Vec<Punch>,
    pub source_files: BTreeSet<String>,
    /// Layouts that contributed to this record (merge can combine both).
    pub layouts: BTreeSet<Layout>,
    /// The date was synthesized from a day-of-month column plus an inferred
    /// month context; no explicit full date cell existed.
    pub synthesized_date: bool,
}

impl DayRecord {
    pub fn earliest_minute(&self) -> Option<i64> {
        self.punches.iter().map(|p| p.minute_of_day).min()
    }

    pub fn latest_minute(&self) -> Option<i64> {
        self.punches.iter().map(|p| p.minute_of_day).max()
    }

    pub fn punch_minutes(&self) -> Vec<i64> {
        self.punches.iter().map(|p| p.minute_of_day).collect()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
