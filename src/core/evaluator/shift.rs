use super::DayPunches;
use super::fixed::evaluate_span;
use crate::models::schedule::ShiftSchedule;
use crate::models::verdict::DayVerdict;
use crate::utils::time::MINUTES_PER_DAY;

/// Same arithmetic as FIXED, with the end unrolled past midnight for an
/// overnight shift (`end <= start`). Punch minutes at or before the nominal
/// shift end belong to the post-midnight tail and are unrolled with it.
pub(super) fn evaluate(
    s: &ShiftSchedule,
    punches: &DayPunches,
    ignore_until: Option<i64>,
) -> DayVerdict {
    let overnight = s.end_min <= s.start_min;
    let end_min = if overnight {
        s.end_min + MINUTES_PER_DAY
    } else {
        s.end_min
    };

    let unroll = |m: i64| {
        if overnight && m <= s.end_min {
            m + MINUTES_PER_DAY
        } else {
            m
        }
    };

    let (earliest, latest) = if punches.minutes.is_empty() {
        let e = punches.earliest.map(unroll);
        let l = punches.latest.map(unroll);
        match (e, l) {
            (Some(e), Some(l)) => (Some(e.min(l)), Some(e.max(l))),
            other => other,
        }
    } else {
        let unrolled: Vec<i64> = punches.minutes.iter().copied().map(unroll).collect();
        (
            unrolled.iter().copied().min(),
            unrolled.iter().copied().max(),
        )
    };

    evaluate_span(
        earliest,
        latest,
        s.start_min,
        end_min,
        s.grace_min,
        s.break_min,
        ignore_until,
    )
}
