//! Per-employee aggregation: folds per-day rows into one summary row per
//! employee token. Pure over its input; recomputed on demand whenever the
//! underlying verdicts change.

use crate::models::rows::{PerDayRow, PerEmployeeRow, ScheduleSource};
use crate::models::verdict::EvalStatus;
use std::collections::BTreeMap;

fn new_summary(row: &PerDayRow) -> PerEmployeeRow {
    PerEmployeeRow {
        employee_token: row.employee_token.clone(),
        display_name: row.display_name.clone(),
        days_with_logs: 0,
        no_punch_days: 0,
        excused_days: 0,
        late_days: 0,
        undertime_days: 0,
        late_rate_pct: 0.0,
        undertime_rate_pct: 0.0,
        total_late_minutes: 0,
        total_undertime_minutes: 0,
        schedule_types: Default::default(),
        schedule_source: row.schedule_source,
        identity: row.identity,
        resolved_employee_id: row.resolved_employee_id.clone(),
        office_id: row.office_id.clone(),
    }
}

/// Group day rows by employee token and fold them into summary rows.
pub fn summarize(rows: &[PerDayRow]) -> Vec<PerEmployeeRow> {
    let mut by_token: BTreeMap<&str, (PerEmployeeRow, bool)> = BTreeMap::new();

    for row in rows {
        let (summary, pattern_seen) = by_token
            .entry(row.employee_token.as_str())
            .or_insert_with(|| (new_summary(row), false));

        if summary.display_name.is_empty() && !row.display_name.is_empty() {
            summary.display_name = row.display_name.clone();
        }
        summary.schedule_types.insert(row.schedule_type.clone());
        summary.schedule_source = summary.schedule_source.max(row.schedule_source);
        *pattern_seen |= row.verdict.weekly_pattern_applied;

        match row.verdict.status {
            EvalStatus::NoPunch => summary.no_punch_days += 1,
            EvalStatus::Excused => summary.excused_days += 1,
            EvalStatus::Evaluated => {
                summary.days_with_logs += 1;
                if row.verdict.is_late {
                    summary.late_days += 1;
                    summary.total_late_minutes += row.verdict.late_minutes;
                }
                if row.verdict.is_undertime {
                    summary.undertime_days += 1;
                    summary.total_undertime_minutes += row.verdict.undertime_minutes;
                }
            }
        }
    }

    by_token
        .into_values()
        .map(|(mut summary, pattern_seen)| {
            // Weekly-pattern usage implies a mapped work schedule even when
            // the token itself had no mapping.
            if pattern_seen && summary.schedule_source < ScheduleSource::WorkSchedule {
                summary.schedule_source = ScheduleSource::WorkSchedule;
            }
            if summary.days_with_logs > 0 {
                let days = summary.days_with_logs as f64;
                summary.late_rate_pct = summary.late_days as f64 * 100.0 / days;
                summary.undertime_rate_pct = summary.undertime_days as f64 * 100.0 / days;
            }
            summary
        })
        .collect()
}
