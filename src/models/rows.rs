use super::verdict::DayVerdict;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the schedule used for a day came from. Ordered by reporting
/// priority: an exception beats a mapped work schedule, which beats the
/// default, which beats no mapping at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScheduleSource {
    NoMapping,
    Default,
    WorkSchedule,
    Exception,
}

impl ScheduleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleSource::NoMapping => "NOMAPPING",
            ScheduleSource::Default => "DEFAULT",
            ScheduleSource::WorkSchedule => "WORKSCHEDULE",
            ScheduleSource::Exception => "EXCEPTION",
        }
    }
}

/// Identity-resolution outcome carried through from the personnel
/// collaborator; the core never performs the lookup itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityStatus {
    Matched,
    Unmatched,
    Ambiguous,
}

/// One evaluated (employee, day): the verdict joined with identity and
/// schedule metadata. Sole input to the reporting layer and the aggregator.
#[derive(Debug, Clone, Serialize)]
pub struct PerDayRow {
    pub employee_token: String,
    pub display_name: String,
    pub department: Option<String>,
    pub date: NaiveDate,
    pub schedule_type: String,
    pub schedule_source: ScheduleSource,
    pub identity: IdentityStatus,
    pub resolved_employee_id: Option<String>,
    pub office_id: Option<String>,
    pub verdict: DayVerdict,
}

/// Aggregated attendance summary for one employee token.
#[derive(Debug, Clone, Serialize)]
pub struct PerEmployeeRow {
    pub employee_token: String,
    pub display_name: String,
    pub days_with_logs: usize,
    pub no_punch_days: usize,
    pub excused_days: usize,
    pub late_days: usize,
    pub undertime_days: usize,
    pub late_rate_pct: f64,
    pub undertime_rate_pct: f64,
    pub total_late_minutes: i64,
    pub total_undertime_minutes: i64,
    pub schedule_types: BTreeSet<String>,
    pub schedule_source: ScheduleSource,
    pub identity: IdentityStatus,
    pub resolved_employee_id: Option<String>,
    pub office_id: Option<String>,
}
