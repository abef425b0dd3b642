use super::schedule::WeeklyExclusion;
use crate::utils::time::format_minute_of_day;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalStatus {
    Evaluated,
    NoPunch,
    Excused,
}

/// An HH:MM start/end pair, used for both pattern windows and the clamped
/// presence segments reported for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HhmmSpan {
    pub start: String,
    pub end: String,
}

impl HhmmSpan {
    pub fn from_minutes(start: i64, end: i64) -> Self {
        Self {
            start: format_minute_of_day(start),
            end: format_minute_of_day(end),
        }
    }
}

/// The evaluator's output for one (employee, day): minute totals plus the
/// diagnostic fields needed to audit how they were computed.
#[derive(Debug, Clone, Serialize)]
pub struct DayVerdict {
    pub status: EvalStatus,
    pub worked_minutes: i64,
    pub is_late: bool,
    pub late_minutes: i64,
    pub is_undertime: bool,
    pub undertime_minutes: i64,
    /// Required-minutes target actually used for this day.
    pub required_minutes: i64,
    /// Effective schedule bounds applied, post weekly-exclusion adjustment.
    pub effective_start_min: Option<i64>,
    pub effective_end_min: Option<i64>,
    pub effective_grace_min: Option<i64>,
    pub weekly_pattern_applied: bool,
    /// Windows of the pattern day, when one applied.
    pub pattern_windows: Vec<HhmmSpan>,
    /// Presence segments clamped to the pattern windows (FLEX+pattern days).
    pub presence: Vec<HhmmSpan>,
    pub exclusion: Option<WeeklyExclusion>,
}

impl DayVerdict {
    fn zeroed(status: EvalStatus) -> Self {
        Self {
            status,
            worked_minutes: 0,
            is_late: false,
            late_minutes: 0,
            is_undertime: false,
            undertime_minutes: 0,
            required_minutes: 0,
            effective_start_min: None,
            effective_end_min: None,
            effective_grace_min: None,
            weekly_pattern_applied: false,
            pattern_windows: Vec::new(),
            presence: Vec::new(),
            exclusion: None,
        }
    }

    pub fn excused(exclusion: WeeklyExclusion) -> Self {
        let mut v = Self::zeroed(EvalStatus::Excused);
        v.exclusion = Some(exclusion);
        v
    }

    pub fn no_punch() -> Self {
        Self::zeroed(EvalStatus::NoPunch)
    }

    pub fn evaluated() -> Self {
        Self::zeroed(EvalStatus::Evaluated)
    }
}
