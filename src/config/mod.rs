//! Schedule book configuration.
//! A YAML file maps employee tokens to their work schedule, optional
//! identity data and dated exclusions. Everything the evaluator needs per
//! (employee, day) is answered from here; the attendance files themselves
//! never carry schedule data.

use crate::core::pattern::{RawWeeklyPattern, WeeklyPattern};
use crate::errors::{AppError, AppResult};
use crate::models::rows::{IdentityStatus, ScheduleSource};
use crate::models::schedule::{Schedule, WeeklyExclusion};
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn default_grace() -> i64 {
    0
}
fn default_break() -> i64 {
    60
}

/// Serde-facing schedule shape; validated into a [`Schedule`] on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawSchedule {
    Fixed {
        start: String,
        end: String,
        #[serde(default = "default_grace")]
        grace_minutes: i64,
        #[serde(default = "default_break")]
        break_minutes: i64,
    },
    Flex {
        core_start: String,
        core_end: String,
        band_start: String,
        band_end: String,
        required_minutes: i64,
        #[serde(default = "default_break")]
        break_minutes: i64,
        #[serde(default = "default_grace")]
        grace_minutes: i64,
        #[serde(default)]
        weekly: Option<RawWeeklyPattern>,
    },
    Shift {
        start: String,
        end: String,
        #[serde(default = "default_grace")]
        grace_minutes: i64,
        #[serde(default = "default_break")]
        break_minutes: i64,
    },
}

impl RawSchedule {
    fn build(&self) -> AppResult<Schedule> {
        match self {
            RawSchedule::Fixed {
                start,
                end,
                grace_minutes,
                break_minutes,
            } => Schedule::fixed(start, end, *grace_minutes, *break_minutes),
            RawSchedule::Flex {
                core_start,
                core_end,
                band_start,
                band_end,
                required_minutes,
                break_minutes,
                grace_minutes,
                weekly,
            } => Schedule::flex(
                core_start,
                core_end,
                band_start,
                band_end,
                *required_minutes,
                *break_minutes,
                *grace_minutes,
                weekly.as_ref().and_then(WeeklyPattern::normalize),
            ),
            RawSchedule::Shift {
                start,
                end,
                grace_minutes,
                break_minutes,
            } => Schedule::shift(start, end, *grace_minutes, *break_minutes),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawEmployeeEntry {
    schedule: RawSchedule,
    /// Resolved personnel id, when the token could be matched.
    #[serde(default)]
    employee_id: Option<String>,
    #[serde(default)]
    office_id: Option<String>,
    /// Set when the token matched more than one personnel record.
    #[serde(default)]
    ambiguous: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct RawExclusion {
    employee: String,
    /// YYYY-MM-DD
    date: String,
    /// "excused" or "ignore_late_until"
    mode: String,
    /// HH:MM, required for ignore_late_until
    #[serde(default)]
    until: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawScheduleBook {
    #[serde(default)]
    default_schedule: Option<RawSchedule>,
    #[serde(default)]
    employees: BTreeMap<String, RawEmployeeEntry>,
    #[serde(default)]
    exclusions: Vec<RawExclusion>,
}

/// Identity-resolution outcome for one token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub status: IdentityStatus,
    pub employee_id: Option<String>,
    pub office_id: Option<String>,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            status: IdentityStatus::Unmatched,
            employee_id: None,
            office_id: None,
        }
    }
}

struct EmployeeEntry {
    schedule: Schedule,
    identity: Identity,
}

/// Validated schedule book, ready for per-day lookups.
pub struct ScheduleBook {
    /// Used when a token has no entry; source reports DEFAULT.
    default_schedule: Option<Schedule>,
    employees: BTreeMap<String, EmployeeEntry>,
    exclusions: BTreeMap<(String, NaiveDate), WeeklyExclusion>,
    /// Last-resort schedule when the book defines no default either.
    fallback: Schedule,
}

impl Default for ScheduleBook {
    fn default() -> Self {
        Self {
            default_schedule: None,
            employees: BTreeMap::new(),
            exclusions: BTreeMap::new(),
            fallback: builtin_fallback(),
        }
    }
}

fn builtin_fallback() -> Schedule {
    // 08:00-17:00 with a one hour break; infallible inputs
    Schedule::fixed("08:00", "17:00", 0, 60).unwrap_or_else(|_| unreachable!())
}

impl ScheduleBook {
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::ScheduleBookLoad(path.display().to_string(), e.to_string())
        })?;
        Self::from_str(&text)
            .map_err(|e| AppError::ScheduleBookLoad(path.display().to_string(), e.to_string()))
    }

    pub fn from_str(text: &str) -> AppResult<Self> {
        let raw: RawScheduleBook =
            serde_yaml::from_str(text).map_err(|e| AppError::Config(e.to_string()))?;
        Self::build(raw)
    }

    fn build(raw: RawScheduleBook) -> AppResult<Self> {
        let default_schedule = raw
            .default_schedule
            .as_ref()
            .map(RawSchedule::build)
            .transpose()?;

        let mut employees = BTreeMap::new();
        for (token, entry) in &raw.employees {
            let schedule = entry.schedule.build().map_err(|e| {
                AppError::Config(format!("employee '{}': {}", token, e))
            })?;
            let status = if entry.ambiguous {
                IdentityStatus::Ambiguous
            } else if entry.employee_id.is_some() {
                IdentityStatus::Matched
            } else {
                IdentityStatus::Unmatched
            };
            employees.insert(
                token.clone(),
                EmployeeEntry {
                    schedule,
                    identity: Identity {
                        status,
                        employee_id: entry.employee_id.clone(),
                        office_id: entry.office_id.clone(),
                    },
                },
            );
        }

        let mut exclusions = BTreeMap::new();
        for exc in &raw.exclusions {
            let date = parse_date(&exc.date)
                .ok_or_else(|| AppError::InvalidDate(exc.date.clone()))?;
            let exclusion = match exc.mode.as_str() {
                "excused" => WeeklyExclusion::Excused,
                "ignore_late_until" => {
                    let until = exc.until.as_deref().ok_or_else(|| {
                        AppError::Config(format!(
                            "exclusion for '{}' on {}: ignore_late_until needs 'until'",
                            exc.employee, exc.date
                        ))
                    })?;
                    let minute = crate::utils::time::parse_hhmm(until)
                        .ok_or_else(|| AppError::InvalidTime(until.to_string()))?;
                    WeeklyExclusion::IgnoreLateUntil {
                        minute_of_day: minute,
                    }
                }
                other => {
                    return Err(AppError::Config(format!(
                        "exclusion for '{}' on {}: unknown mode '{}'",
                        exc.employee, exc.date, other
                    )));
                }
            };
            exclusions.insert((exc.employee.clone(), date), exclusion);
        }

        Ok(Self {
            default_schedule,
            employees,
            exclusions,
            fallback: builtin_fallback(),
        })
    }

    /// Schedule for a token plus where it came from. Exception upgrades are
    /// the pipeline's concern; lookup never reports one.
    pub fn lookup(&self, token: &str) -> (&Schedule, ScheduleSource) {
        if let Some(entry) = self.employees.get(token) {
            return (&entry.schedule, ScheduleSource::WorkSchedule);
        }
        match &self.default_schedule {
            Some(s) => (s, ScheduleSource::Default),
            None => (&self.fallback, ScheduleSource::NoMapping),
        }
    }

    pub fn exclusion(&self, token: &str, date: NaiveDate) -> Option<&WeeklyExclusion> {
        self.exclusions.get(&(token.to_string(), date))
    }

    pub fn identity(&self, token: &str) -> Identity {
        self.employees
            .get(token)
            .map(|e| e.identity.clone())
            .unwrap_or_default()
    }
}
