use attendlog::core::evaluator::{DayPunches, evaluate_day};
use attendlog::core::pattern::{RawPatternDay, RawWeeklyPattern, RawWindow, WeekdayKey, WeeklyPattern};
use attendlog::models::schedule::{Schedule, WeeklyExclusion};
use attendlog::models::verdict::EvalStatus;
use chrono::NaiveDate;
use std::collections::BTreeMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// a Tuesday; only the FLEX pattern tests care about the weekday
fn any_day() -> NaiveDate {
    date(2025, 3, 18)
}

fn punches(times: &[&str]) -> DayPunches {
    DayPunches::from_raw_times(times)
}

#[test]
fn fixed_late_arrival_short_span_keeps_break() {
    let schedule = Schedule::fixed("08:00", "17:00", 0, 60).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["08:45", "17:00"]), &schedule, None);

    assert_eq!(verdict.status, EvalStatus::Evaluated);
    // 495-minute span cannot absorb the break on top of the 480 target
    assert_eq!(verdict.worked_minutes, 495);
    assert!(verdict.is_late);
    assert_eq!(verdict.late_minutes, 45);
    assert!(!verdict.is_undertime);
}

#[test]
fn fixed_full_day_deducts_break() {
    let schedule = Schedule::fixed("08:00", "17:00", 0, 60).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["08:00", "17:00"]), &schedule, None);

    assert_eq!(verdict.worked_minutes, 480);
    assert!(!verdict.is_late);
    assert!(!verdict.is_undertime);
}

#[test]
fn fixed_grace_forgives_small_lateness() {
    let schedule = Schedule::fixed("08:00", "17:00", 15, 60).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["08:10", "17:00"]), &schedule, None);
    assert!(!verdict.is_late);

    let verdict = evaluate_day(any_day(), &punches(&["08:16", "17:00"]), &schedule, None);
    assert!(verdict.is_late);
    assert_eq!(verdict.late_minutes, 16);
}

#[test]
fn fixed_early_departure_is_undertime() {
    let schedule = Schedule::fixed("08:00", "17:00", 0, 60).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["08:00", "15:00"]), &schedule, None);

    assert_eq!(verdict.worked_minutes, 420);
    assert!(verdict.is_undertime);
    assert_eq!(verdict.undertime_minutes, 60);
}

#[test]
fn shift_overnight_unrolls_past_midnight() {
    let schedule = Schedule::shift("22:00", "06:00", 0, 60).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["22:00", "06:00"]), &schedule, None);

    assert_eq!(verdict.worked_minutes, 420);
    assert!(!verdict.is_late);
    assert!(!verdict.is_undertime);
}

#[test]
fn shift_overnight_late_start() {
    let schedule = Schedule::shift("22:00", "06:00", 0, 60).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["23:30", "06:00"]), &schedule, None);

    assert!(verdict.is_late);
    assert_eq!(verdict.late_minutes, 90);
    assert!(verdict.is_undertime);
}

#[test]
fn flex_bandwidth_counts_only_inside_band() {
    let schedule =
        Schedule::flex("10:00", "15:00", "06:00", "20:00", 480, 60, 0, None).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["05:00", "21:00"]), &schedule, None);

    // clamped to 06:00-20:00, 840-minute span absorbs the break
    assert_eq!(verdict.worked_minutes, 780);
    assert!(!verdict.is_late);
    assert!(!verdict.is_undertime);
}

#[test]
fn flex_missing_core_hours_scores_the_full_penalty() {
    let schedule =
        Schedule::flex("10:00", "15:00", "06:00", "20:00", 480, 60, 0, None).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["16:00", "18:00"]), &schedule, None);

    assert_eq!(verdict.worked_minutes, 0);
    assert!(verdict.is_late);
    assert_eq!(verdict.late_minutes, 300);
    assert!(verdict.is_undertime);
    assert_eq!(verdict.undertime_minutes, 480);
}

#[test]
fn flex_core_arrival_after_grace_is_late() {
    let schedule =
        Schedule::flex("10:00", "15:00", "06:00", "20:00", 480, 60, 0, None).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["10:20", "19:00"]), &schedule, None);

    assert!(verdict.is_late);
    assert_eq!(verdict.late_minutes, 20);
}

fn monday_pattern(required: f64) -> WeeklyPattern {
    let mut days = BTreeMap::new();
    days.insert(
        WeekdayKey::Mon,
        RawPatternDay {
            windows: vec![RawWindow::new("08:00", "12:00")],
            required_minutes: Some(required),
        },
    );
    WeeklyPattern::normalize(&RawWeeklyPattern { days }).unwrap()
}

#[test]
fn flex_pattern_day_clamps_presence_to_windows() {
    let schedule = Schedule::flex(
        "10:00",
        "15:00",
        "06:00",
        "20:00",
        480,
        60,
        0,
        Some(monday_pattern(240.0)),
    )
    .unwrap();
    let monday = date(2025, 3, 17);

    // full window, no break deduction on the pattern path
    let verdict = evaluate_day(monday, &punches(&["08:00", "12:00"]), &schedule, None);
    assert_eq!(verdict.worked_minutes, 240);
    assert!(verdict.weekly_pattern_applied);
    assert!(!verdict.is_late);
    assert!(!verdict.is_undertime);
    assert_eq!(verdict.required_minutes, 240);

    // late arrival eats into both lateness and the required target
    let verdict = evaluate_day(monday, &punches(&["09:00", "12:00"]), &schedule, None);
    assert_eq!(verdict.worked_minutes, 180);
    assert!(verdict.is_late);
    assert_eq!(verdict.late_minutes, 60);
    assert_eq!(verdict.undertime_minutes, 60);
}

#[test]
fn flex_pattern_ignores_presence_outside_windows() {
    let schedule = Schedule::flex(
        "10:00",
        "15:00",
        "06:00",
        "20:00",
        480,
        60,
        0,
        Some(monday_pattern(240.0)),
    )
    .unwrap();
    let monday = date(2025, 3, 17);

    let verdict = evaluate_day(
        monday,
        &punches(&["08:00", "12:00", "14:00", "16:00"]),
        &schedule,
        None,
    );
    // the afternoon pair falls fully outside the 08:00-12:00 window
    assert_eq!(verdict.worked_minutes, 240);
}

#[test]
fn flex_non_pattern_weekday_uses_the_bandwidth_path() {
    let schedule = Schedule::flex(
        "10:00",
        "15:00",
        "06:00",
        "20:00",
        480,
        60,
        0,
        Some(monday_pattern(240.0)),
    )
    .unwrap();
    let tuesday = date(2025, 3, 18);

    let verdict = evaluate_day(tuesday, &punches(&["09:00", "18:30"]), &schedule, None);
    assert!(!verdict.weekly_pattern_applied);
    assert_eq!(verdict.worked_minutes, 510);
}

#[test]
fn no_punch_day_is_not_penalized() {
    let schedule = Schedule::fixed("08:00", "17:00", 0, 60).unwrap();
    let verdict = evaluate_day(any_day(), &DayPunches::default(), &schedule, None);

    assert_eq!(verdict.status, EvalStatus::NoPunch);
    assert!(!verdict.is_late);
    assert!(!verdict.is_undertime);
    assert_eq!(verdict.worked_minutes, 0);
}

#[test]
fn excused_day_short_circuits() {
    let schedule = Schedule::fixed("08:00", "17:00", 0, 60).unwrap();
    let verdict = evaluate_day(
        any_day(),
        &punches(&["10:00", "12:00"]),
        &schedule,
        Some(&WeeklyExclusion::Excused),
    );

    assert_eq!(verdict.status, EvalStatus::Excused);
    assert!(!verdict.is_late);
    assert!(!verdict.is_undertime);
}

#[test]
fn ignore_late_until_raises_only_the_lateness_threshold() {
    let schedule = Schedule::fixed("08:00", "17:00", 0, 60).unwrap();
    let exclusion = WeeklyExclusion::IgnoreLateUntil { minute_of_day: 600 };

    let verdict = evaluate_day(
        any_day(),
        &punches(&["09:50", "17:00"]),
        &schedule,
        Some(&exclusion),
    );
    assert!(!verdict.is_late);
    // the required target keeps the nominal start
    assert_eq!(verdict.required_minutes, 480);
    assert!(verdict.is_undertime);

    let verdict = evaluate_day(
        any_day(),
        &punches(&["10:30", "17:00"]),
        &schedule,
        Some(&exclusion),
    );
    assert!(verdict.is_late);
    assert_eq!(verdict.late_minutes, 30);
}

#[test]
fn span_only_input_matches_the_punch_list_path() {
    let schedule = Schedule::fixed("08:00", "17:00", 0, 60).unwrap();
    let from_span = evaluate_day(any_day(), &DayPunches::span_only(525, 1020), &schedule, None);
    let from_list = evaluate_day(any_day(), &punches(&["08:45", "17:00"]), &schedule, None);

    assert_eq!(from_span.worked_minutes, from_list.worked_minutes);
    assert_eq!(from_span.is_late, from_list.is_late);
    assert_eq!(from_span.late_minutes, from_list.late_minutes);
}

#[test]
fn odd_punch_count_still_produces_a_span_verdict() {
    let schedule = Schedule::fixed("08:00", "17:00", 0, 60).unwrap();
    let verdict = evaluate_day(any_day(), &punches(&["08:00"]), &schedule, None);

    assert_eq!(verdict.status, EvalStatus::Evaluated);
    assert!(!verdict.is_late);
}
