//! Weekly pattern model: up to three non-overlapping time windows per
//! weekday, each day with its own required-minutes target. Windows may wrap
//! past midnight (`end <= start`).

use crate::utils::time::{MINUTES_PER_DAY, format_minute_of_day, parse_hhmm};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_WINDOWS_PER_DAY: usize = 3;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl WeekdayKey {
    pub fn from_weekday(w: Weekday) -> Self {
        match w {
            Weekday::Mon => WeekdayKey::Mon,
            Weekday::Tue => WeekdayKey::Tue,
            Weekday::Wed => WeekdayKey::Wed,
            Weekday::Thu => WeekdayKey::Thu,
            Weekday::Fri => WeekdayKey::Fri,
            Weekday::Sat => WeekdayKey::Sat,
            Weekday::Sun => WeekdayKey::Sun,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekdayKey::Mon => "mon",
            WeekdayKey::Tue => "tue",
            WeekdayKey::Wed => "wed",
            WeekdayKey::Thu => "thu",
            WeekdayKey::Fri => "fri",
            WeekdayKey::Sat => "sat",
            WeekdayKey::Sun => "sun",
        }
    }
}

/// One allowed presence window, in minutes of day. `end_min <= start_min`
/// signals a wrap past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternWindow {
    pub start_min: i64,
    pub end_min: i64,
}

impl PatternWindow {
    pub fn wraps(&self) -> bool {
        self.end_min <= self.start_min
    }

    /// End minute on the 48h line the window lives on.
    pub fn unrolled_end(&self) -> i64 {
        if self.wraps() {
            self.end_min + MINUTES_PER_DAY
        } else {
            self.end_min
        }
    }

    /// The window as one or two same-day minute intervals, split at
    /// midnight when it wraps. Intervals are half-open `[start, end)`.
    pub fn intervals(&self) -> Vec<(i64, i64)> {
        if !self.wraps() {
            return vec![(self.start_min, self.end_min)];
        }
        let mut out = vec![(self.start_min, MINUTES_PER_DAY)];
        if self.end_min > 0 {
            out.push((0, self.end_min));
        }
        out
    }

    pub fn start_hhmm(&self) -> String {
        format_minute_of_day(self.start_min)
    }

    pub fn end_hhmm(&self) -> String {
        format_minute_of_day(self.end_min)
    }
}

/// Deterministic chronological sort: by start minute, ties broken by the
/// unrolled end so a wrapping window sorts after a shorter same-start one.
/// Stable fixpoint: sorting an already-sorted list leaves it unchanged.
pub fn sort_windows(windows: &mut [PatternWindow]) {
    windows.sort_by_key(|w| (w.start_min, w.unrolled_end()));
}

fn windows_overlap(windows: &[PatternWindow]) -> bool {
    let mut intervals: Vec<(i64, i64)> = windows.iter().flat_map(|w| w.intervals()).collect();
    intervals.sort_unstable();
    intervals.windows(2).any(|p| p[1].0 < p[0].1)
}

/// One weekday's validated definition.
#[derive(Debug, Clone, Serialize)]
pub struct PatternDay {
    /// 1..=3 windows, start-sorted.
    pub windows: Vec<PatternWindow>,
    pub required_minutes: i64,
}

impl PatternDay {
    /// Earliest window after sorting; drives pattern-day lateness.
    pub fn earliest_window(&self) -> Option<&PatternWindow> {
        self.windows.first()
    }
}

/// Canonical weekly pattern: weekday -> validated day definition.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeeklyPattern {
    pub days: BTreeMap<WeekdayKey, PatternDay>,
}

impl WeeklyPattern {
    pub fn day(&self, key: WeekdayKey) -> Option<&PatternDay> {
        self.days.get(&key)
    }

    /// Normalize a raw (serde-facing) pattern. Per weekday: drop windows
    /// that are not valid HH:MM or are zero-length, keep at most
    /// [`MAX_WINDOWS_PER_DAY`], sort, and reject the whole day when windows
    /// overlap on the unrolled timeline or the required-minutes target is
    /// missing, non-finite or negative. Returns None when no day survives.
    pub fn normalize(raw: &RawWeeklyPattern) -> Option<WeeklyPattern> {
        let mut days = BTreeMap::new();
        for (key, raw_day) in &raw.days {
            if let Some(day) = normalize_day(raw_day) {
                days.insert(*key, day);
            }
        }
        if days.is_empty() {
            None
        } else {
            Some(WeeklyPattern { days })
        }
    }
}

fn normalize_day(raw: &RawPatternDay) -> Option<PatternDay> {
    let required = raw.required_minutes?;
    if !required.is_finite() || required < 0.0 {
        return None;
    }

    let mut windows = Vec::new();
    for w in &raw.windows {
        let (start, end) = match (parse_hhmm(&w.start), parse_hhmm(&w.end)) {
            (Some(s), Some(e)) => (s, e),
            _ => continue,
        };
        // start == end would be a zero-length window, not a 24h one
        if start == end {
            continue;
        }
        windows.push(PatternWindow {
            start_min: start,
            end_min: end,
        });
        if windows.len() == MAX_WINDOWS_PER_DAY {
            break;
        }
    }

    if windows.is_empty() {
        return None;
    }
    sort_windows(&mut windows);
    if windows_overlap(&windows) {
        return None;
    }

    Some(PatternDay {
        windows,
        required_minutes: required.round() as i64,
    })
}

// ---------------------------
// Raw (serde-facing) shapes
// ---------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeeklyPattern {
    #[serde(flatten)]
    pub days: BTreeMap<WeekdayKey, RawPatternDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPatternDay {
    #[serde(default)]
    pub windows: Vec<RawWindow>,
    /// Deserialized as a float so a non-finite value can be rejected here
    /// instead of blowing up downstream arithmetic.
    pub required_minutes: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWindow {
    pub start: String,
    pub end: String,
}

impl RawWindow {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}
