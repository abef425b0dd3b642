use super::{DayPunches, Segment, net_worked, presence_segments};
use crate::core::pattern::{PatternDay, WeekdayKey};
use crate::models::schedule::FlexSchedule;
use crate::models::verdict::{DayVerdict, HhmmSpan};
use crate::utils::time::MINUTES_PER_DAY;

pub(super) fn evaluate(
    s: &FlexSchedule,
    weekday: WeekdayKey,
    punches: &DayPunches,
    ignore_until: Option<i64>,
) -> DayVerdict {
    if let Some(weekly) = &s.weekly {
        if let Some(day) = weekly.day(weekday) {
            return evaluate_with_pattern(s, day, punches, ignore_until);
        }
    }
    evaluate_bandwidth(s, punches, ignore_until)
}

/// FLEX without a pattern day: presence counts only inside the bandwidth,
/// and a punch set that never reaches core hours is scored with the full
/// punitive fallback (late by the whole core span, undertime by the whole
/// required target). That fallback is a load-bearing business policy, not a
/// numerical default.
fn evaluate_bandwidth(
    s: &FlexSchedule,
    punches: &DayPunches,
    ignore_until: Option<i64>,
) -> DayVerdict {
    let effective_core_start = ignore_until.map_or(s.core_start_min, |m| s.core_start_min.max(m));

    let mut verdict = DayVerdict::evaluated();
    verdict.required_minutes = s.required_min;
    verdict.effective_start_min = Some(effective_core_start);
    verdict.effective_end_min = Some(s.core_end_min);
    verdict.effective_grace_min = Some(s.grace_min);

    let (earliest, latest) = match (punches.earliest, punches.latest) {
        (Some(e), Some(l)) => (e, l),
        _ => return verdict,
    };

    let arrival = earliest.max(s.band_start_min);
    let departure = latest.min(s.band_end_min);

    let outside_bandwidth = departure <= arrival;
    let misses_core = departure <= s.core_start_min || arrival >= s.core_end_min;
    if outside_bandwidth || misses_core {
        verdict.is_late = true;
        verdict.late_minutes = (s.core_end_min - s.core_start_min).max(0);
        verdict.is_undertime = s.required_min > 0;
        verdict.undertime_minutes = s.required_min;
        return verdict;
    }

    let worked = net_worked(departure - arrival, s.required_min, s.break_min);
    let undertime = (s.required_min - worked).max(0);

    verdict.worked_minutes = worked;
    verdict.is_undertime = undertime > 0;
    verdict.undertime_minutes = undertime;
    if arrival > effective_core_start + s.grace_min {
        verdict.is_late = true;
        verdict.late_minutes = arrival - effective_core_start;
    }
    verdict
}

/// FLEX with a pattern day for this weekday: the required target comes from
/// the pattern, worked minutes are the presence segments clamped against the
/// pattern windows, and no break is deducted on this path.
fn evaluate_with_pattern(
    s: &FlexSchedule,
    day: &PatternDay,
    punches: &DayPunches,
    ignore_until: Option<i64>,
) -> DayVerdict {
    let segments = presence_segments(punches);

    // Windows are start-sorted; expand to same-day intervals once.
    let mut window_intervals: Vec<(i64, i64)> =
        day.windows.iter().flat_map(|w| w.intervals()).collect();
    window_intervals.sort_unstable();

    let mut worked = 0;
    let mut clamped = Vec::new();
    for seg in &segments {
        for &(ws, we) in &window_intervals {
            if ws >= seg.end {
                break;
            }
            let start = seg.start.max(ws);
            let end = seg.end.min(we);
            if end > start {
                worked += end - start;
                clamped.push(Segment { start, end });
            }
        }
    }

    let required = day.required_minutes;
    let undertime = (required - worked).max(0);

    let mut verdict = DayVerdict::evaluated();
    verdict.worked_minutes = worked;
    verdict.required_minutes = required;
    verdict.is_undertime = undertime > 0;
    verdict.undertime_minutes = undertime;
    verdict.weekly_pattern_applied = true;
    verdict.pattern_windows = day
        .windows
        .iter()
        .map(|w| HhmmSpan {
            start: w.start_hhmm(),
            end: w.end_hhmm(),
        })
        .collect();
    verdict.presence = clamped
        .iter()
        .map(|c| HhmmSpan::from_minutes(c.start, c.end))
        .collect();
    verdict.effective_grace_min = Some(s.grace_min);

    // Lateness is judged against the earliest window only. The raw first
    // punch is unrolled +24h when it lands on the post-midnight tail of a
    // wrapping earliest window.
    if let Some(win) = day.earliest_window() {
        let effective_start = ignore_until.map_or(win.start_min, |m| win.start_min.max(m));
        verdict.effective_start_min = Some(effective_start);
        verdict.effective_end_min = Some(win.end_min);

        let first_raw = punches.minutes.first().copied().or(punches.earliest);
        if let Some(mut first) = first_raw {
            if win.wraps() && first <= win.end_min {
                first += MINUTES_PER_DAY;
            }
            if first > effective_start + s.grace_min {
                verdict.is_late = true;
                verdict.late_minutes = first - effective_start;
            }
        }
    }

    verdict
}
