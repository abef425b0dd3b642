use crate::utils::time::format_minute_of_day;
use serde::Serialize;
use std::collections::BTreeSet;

/// Provenance of a punch: seen once, or collapsed from two or more
/// occurrences at the same clock minute (within one file or across files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PunchOrigin {
    Original,
    Merged,
}

/// Physical workbook layout a record was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    Legacy,
    GridReport,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Legacy => "legacy",
            Layout::GridReport => "grid-report",
        }
    }
}

/// A single clock event, keyed by its minute of day.
#[derive(Debug, Clone, Serialize)]
pub struct Punch {
    /// Clock time as HH:MM.
    pub time: String,
    pub minute_of_day: i64,
    pub origin: PunchOrigin,
    /// Source file names that produced this punch.
    pub sources: BTreeSet<String>,
}

impl Punch {
    pub fn new(minute_of_day: i64, source: Option<&str>) -> Self {
        let mut sources = BTreeSet::new();
        if let Some(s) = source {
            sources.insert(s.to_string());
        }
        Self {
            time: format_minute_of_day(minute_of_day),
            minute_of_day,
            origin: PunchOrigin::Original,
            sources,
        }
    }

    /// Fold a duplicate occurrence at the same minute into this punch.
    pub fn absorb(&mut self, source: Option<&str>) {
        self.origin = PunchOrigin::Merged;
        if let Some(s) = source {
            self.sources.insert(s.to_string());
        }
    }
}
