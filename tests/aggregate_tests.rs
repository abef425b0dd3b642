use attendlog::core::aggregate::summarize;
use attendlog::models::rows::{IdentityStatus, PerDayRow, ScheduleSource};
use attendlog::models::verdict::{DayVerdict, EvalStatus};
use chrono::NaiveDate;

fn day_row(token: &str, day: u32, verdict: DayVerdict, source: ScheduleSource) -> PerDayRow {
    PerDayRow {
        employee_token: token.to_string(),
        display_name: format!("Emp {token}"),
        department: None,
        date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        schedule_type: "FIXED".to_string(),
        schedule_source: source,
        identity: IdentityStatus::Unmatched,
        resolved_employee_id: None,
        office_id: None,
        verdict,
    }
}

fn evaluated(late: i64, undertime: i64) -> DayVerdict {
    let mut v = DayVerdict::evaluated();
    v.status = EvalStatus::Evaluated;
    v.is_late = late > 0;
    v.late_minutes = late;
    v.is_undertime = undertime > 0;
    v.undertime_minutes = undertime;
    v
}

#[test]
fn counts_and_rates_per_employee() {
    let rows = vec![
        day_row("100042", 1, evaluated(0, 0), ScheduleSource::Default),
        day_row("100042", 2, evaluated(30, 0), ScheduleSource::Default),
        day_row("100042", 3, evaluated(15, 60), ScheduleSource::Default),
        day_row("100042", 4, DayVerdict::no_punch(), ScheduleSource::Default),
    ];

    let summaries = summarize(&rows);
    assert_eq!(summaries.len(), 1);
    let s = &summaries[0];
    assert_eq!(s.days_with_logs, 3);
    assert_eq!(s.no_punch_days, 1);
    assert_eq!(s.late_days, 2);
    assert_eq!(s.undertime_days, 1);
    assert_eq!(s.total_late_minutes, 45);
    assert_eq!(s.total_undertime_minutes, 60);
    assert!((s.late_rate_pct - 200.0 / 3.0).abs() < 1e-9);
    assert!((s.undertime_rate_pct - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn excused_and_no_punch_days_do_not_dilute_rates() {
    let mut excused = DayVerdict::no_punch();
    excused.status = EvalStatus::Excused;
    let rows = vec![
        day_row("100042", 1, evaluated(10, 0), ScheduleSource::Default),
        day_row("100042", 2, excused, ScheduleSource::Default),
        day_row("100042", 3, DayVerdict::no_punch(), ScheduleSource::Default),
    ];

    let s = &summarize(&rows)[0];
    assert_eq!(s.days_with_logs, 1);
    assert_eq!(s.excused_days, 1);
    assert_eq!(s.no_punch_days, 1);
    assert!((s.late_rate_pct - 100.0).abs() < 1e-9);
}

#[test]
fn rates_are_zero_when_no_day_was_evaluated() {
    let rows = vec![day_row(
        "100042",
        1,
        DayVerdict::no_punch(),
        ScheduleSource::NoMapping,
    )];
    let s = &summarize(&rows)[0];
    assert_eq!(s.late_rate_pct, 0.0);
    assert_eq!(s.undertime_rate_pct, 0.0);
}

#[test]
fn schedule_source_reports_the_highest_priority_seen() {
    let rows = vec![
        day_row("100042", 1, evaluated(0, 0), ScheduleSource::Default),
        day_row("100042", 2, evaluated(0, 0), ScheduleSource::Exception),
        day_row("100042", 3, evaluated(0, 0), ScheduleSource::WorkSchedule),
    ];
    let s = &summarize(&rows)[0];
    assert_eq!(s.schedule_source, ScheduleSource::Exception);
}

#[test]
fn weekly_pattern_usage_upgrades_the_source() {
    let mut verdict = evaluated(0, 0);
    verdict.weekly_pattern_applied = true;
    let rows = vec![day_row("100042", 1, verdict, ScheduleSource::NoMapping)];

    let s = &summarize(&rows)[0];
    assert_eq!(s.schedule_source, ScheduleSource::WorkSchedule);
}

#[test]
fn employees_are_grouped_by_token() {
    let rows = vec![
        day_row("100042", 1, evaluated(0, 0), ScheduleSource::Default),
        day_row("100043", 1, evaluated(20, 0), ScheduleSource::Default),
    ];
    let summaries = summarize(&rows);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].employee_token, "100042");
    assert_eq!(summaries[1].employee_token, "100043");
    assert_eq!(summaries[1].late_days, 1);
}
