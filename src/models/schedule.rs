use crate::core::pattern::WeeklyPattern;
use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_hhmm;
use serde::Serialize;

/// Fixed working hours: a start/end pair with grace and break allowances.
#[derive(Debug, Clone, Serialize)]
pub struct FixedSchedule {
    pub start_min: i64,
    pub end_min: i64,
    pub grace_min: i64,
    pub break_min: i64,
}

/// Flexible bandwidth hours: mandatory core hours inside the widest allowed
/// punch window, with an optional per-weekday pattern override.
#[derive(Debug, Clone, Serialize)]
pub struct FlexSchedule {
    pub core_start_min: i64,
    pub core_end_min: i64,
    pub band_start_min: i64,
    pub band_end_min: i64,
    pub required_min: i64,
    pub break_min: i64,
    pub grace_min: i64,
    pub weekly: Option<WeeklyPattern>,
}

/// Shift hours; `end_min <= start_min` signals an overnight shift.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftSchedule {
    pub start_min: i64,
    pub end_min: i64,
    pub grace_min: i64,
    pub break_min: i64,
}

/// The three schedule kinds an evaluation call can be given. Supplied per
/// call by the scheduling collaborator; never persisted here.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schedule {
    Fixed(FixedSchedule),
    Flex(FlexSchedule),
    Shift(ShiftSchedule),
}

fn time_field(s: &str) -> AppResult<i64> {
    parse_hhmm(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

impl Schedule {
    pub fn fixed(start: &str, end: &str, grace_min: i64, break_min: i64) -> AppResult<Self> {
        Ok(Schedule::Fixed(FixedSchedule {
            start_min: time_field(start)?,
            end_min: time_field(end)?,
            grace_min,
            break_min,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn flex(
        core_start: &str,
        core_end: &str,
        band_start: &str,
        band_end: &str,
        required_min: i64,
        break_min: i64,
        grace_min: i64,
        weekly: Option<WeeklyPattern>,
    ) -> AppResult<Self> {
        Ok(Schedule::Flex(FlexSchedule {
            core_start_min: time_field(core_start)?,
            core_end_min: time_field(core_end)?,
            band_start_min: time_field(band_start)?,
            band_end_min: time_field(band_end)?,
            required_min,
            break_min,
            grace_min,
            weekly,
        }))
    }

    pub fn shift(start: &str, end: &str, grace_min: i64, break_min: i64) -> AppResult<Self> {
        Ok(Schedule::Shift(ShiftSchedule {
            start_min: time_field(start)?,
            end_min: time_field(end)?,
            grace_min,
            break_min,
        }))
    }

    pub fn type_label(&self) -> &'static str {
        match self {
            Schedule::Fixed(_) => "FIXED",
            Schedule::Flex(_) => "FLEX",
            Schedule::Shift(_) => "SHIFT",
        }
    }
}

/// Per-day override supplied next to the schedule: either the day is fully
/// excused, or arrivals before a given minute are never flagged late.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WeeklyExclusion {
    Excused,
    IgnoreLateUntil { minute_of_day: i64 },
}
