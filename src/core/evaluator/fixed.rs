use super::{DayPunches, net_worked};
use crate::models::schedule::FixedSchedule;
use crate::models::verdict::DayVerdict;

/// Shared span arithmetic for FIXED and (unrolled) SHIFT schedules.
///
/// The lateness threshold uses the effective start (raised by an
/// ignore-late-until exclusion); the required target keeps the nominal
/// start, since the exclusion only forgives lateness.
pub(super) fn evaluate_span(
    earliest: Option<i64>,
    latest: Option<i64>,
    start_min: i64,
    end_min: i64,
    grace_min: i64,
    break_min: i64,
    ignore_until: Option<i64>,
) -> DayVerdict {
    let effective_start = ignore_until.map_or(start_min, |m| start_min.max(m));
    let required = (end_min - start_min - break_min).max(0);

    let (worked, is_late, late_minutes) = match (earliest, latest) {
        (Some(e), Some(l)) => {
            let worked = net_worked(l - e, required, break_min);
            let late = e > effective_start + grace_min;
            let late_minutes = if late { e - effective_start } else { 0 };
            (worked, late, late_minutes)
        }
        _ => (0, false, 0),
    };

    let undertime = (required - worked).max(0);

    let mut verdict = DayVerdict::evaluated();
    verdict.worked_minutes = worked;
    verdict.is_late = is_late;
    verdict.late_minutes = late_minutes;
    verdict.is_undertime = undertime > 0;
    verdict.undertime_minutes = undertime;
    verdict.required_minutes = required;
    verdict.effective_start_min = Some(effective_start);
    verdict.effective_end_min = Some(end_min);
    verdict.effective_grace_min = Some(grace_min);
    verdict
}

pub(super) fn evaluate(
    s: &FixedSchedule,
    punches: &DayPunches,
    ignore_until: Option<i64>,
) -> DayVerdict {
    evaluate_span(
        punches.earliest,
        punches.latest,
        s.start_min,
        s.end_min,
        s.grace_min,
        s.break_min,
        ignore_until,
    )
}
