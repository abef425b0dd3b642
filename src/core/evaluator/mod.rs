//! Day evaluation: scores one day's punch set against a schedule, honoring
//! an optional weekly exclusion. Total over its input domain: every branch
//! has a defined fallback and nothing here returns an error.

use crate::models::punch::Punch;
use crate::models::schedule::{Schedule, WeeklyExclusion};
use crate::models::verdict::{DayVerdict, EvalStatus};
use crate::utils::time::{MINUTES_PER_DAY, parse_hhmm};
use chrono::{Datelike, NaiveDate};

mod fixed;
mod flex;
mod shift;

/// One day's punch input: the full minute list when the parser produced it,
/// or just an earliest/latest pair when only a span is known.
#[derive(Debug, Clone, Default)]
pub struct DayPunches {
    /// Minutes of day in chronological order.
    pub minutes: Vec<i64>,
    pub earliest: Option<i64>,
    pub latest: Option<i64>,
}

impl DayPunches {
    pub fn from_punches(punches: &[Punch]) -> Self {
        let minutes: Vec<i64> = punches.iter().map(|p| p.minute_of_day).collect();
        Self {
            earliest: minutes.iter().copied().min(),
            latest: minutes.iter().copied().max(),
            minutes,
        }
    }

    /// Build from raw HH:MM strings; malformed entries are filtered out,
    /// treated as absent rather than an error.
    pub fn from_raw_times<S: AsRef<str>>(times: &[S]) -> Self {
        let minutes: Vec<i64> = times.iter().filter_map(|t| parse_hhmm(t.as_ref())).collect();
        Self {
            earliest: minutes.iter().copied().min(),
            latest: minutes.iter().copied().max(),
            minutes,
        }
    }

    pub fn span_only(earliest: i64, latest: i64) -> Self {
        Self {
            minutes: Vec::new(),
            earliest: Some(earliest),
            latest: Some(latest),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty() && (self.earliest.is_none() || self.latest.is_none())
    }
}

/// A same-day presence interval in minutes, `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: i64,
    pub end: i64,
}

fn push_pair(segments: &mut Vec<Segment>, punch_in: i64, punch_out: i64) {
    if punch_out >= punch_in {
        segments.push(Segment {
            start: punch_in,
            end: punch_out,
        });
    } else {
        // out before in: overnight wrap, split at midnight
        segments.push(Segment {
            start: punch_in,
            end: MINUTES_PER_DAY,
        });
        if punch_out > 0 {
            segments.push(Segment {
                start: 0,
                end: punch_out,
            });
        }
    }
}

/// Pair punches into (in, out) presence segments in the given order. An
/// "out before in" pair wraps overnight; a trailing unpaired punch stays
/// open until midnight. Falls back to the earliest/latest span when no
/// punch list exists.
pub fn presence_segments(punches: &DayPunches) -> Vec<Segment> {
    let mut segments = Vec::new();

    if !punches.minutes.is_empty() {
        let mins = &punches.minutes;
        let mut i = 0;
        while i < mins.len() {
            if i + 1 < mins.len() {
                push_pair(&mut segments, mins[i], mins[i + 1]);
                i += 2;
            } else {
                segments.push(Segment {
                    start: mins[i],
                    end: MINUTES_PER_DAY,
                });
                i += 1;
            }
        }
    } else if let (Some(e), Some(l)) = (punches.earliest, punches.latest) {
        push_pair(&mut segments, e, l);
    }

    segments
}

/// Break minutes are deducted only when the presence span is long enough to
/// absorb them on top of the required target; a shorter span is counted
/// as-is.
pub(crate) fn net_worked(span: i64, required: i64, break_min: i64) -> i64 {
    let span = span.max(0);
    if span >= required + break_min {
        (span - break_min).max(0)
    } else {
        span
    }
}

/// Evaluate one day. `date` picks the weekday for FLEX patterns; the
/// exclusion, when present, either short-circuits the day as excused or
/// raises the effective start used for lateness.
pub fn evaluate_day(
    date: NaiveDate,
    punches: &DayPunches,
    schedule: &Schedule,
    exclusion: Option<&WeeklyExclusion>,
) -> DayVerdict {
    if let Some(WeeklyExclusion::Excused) = exclusion {
        return DayVerdict::excused(WeeklyExclusion::Excused);
    }

    let ignore_until = match exclusion {
        Some(WeeklyExclusion::IgnoreLateUntil { minute_of_day }) => Some(*minute_of_day),
        _ => None,
    };

    if punches.is_empty() {
        // No-punch days are never penalized individually; absence policy
        // belongs to the caller.
        let mut verdict = DayVerdict::no_punch();
        verdict.exclusion = exclusion.cloned();
        return verdict;
    }

    let weekday = crate::core::pattern::WeekdayKey::from_weekday(date.weekday());
    let mut verdict = match schedule {
        Schedule::Fixed(s) => fixed::evaluate(s, punches, ignore_until),
        Schedule::Shift(s) => shift::evaluate(s, punches, ignore_until),
        Schedule::Flex(s) => flex::evaluate(s, weekday, punches, ignore_until),
    };
    verdict.status = EvalStatus::Evaluated;
    verdict.exclusion = exclusion.cloned();
    verdict
}
