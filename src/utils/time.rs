//! Time utilities: parsing HH:MM (24h and 12h with AM/PM), minute-of-day
//! conversion, formatting minutes, and extracting clock times embedded in
//! arbitrary cell text.

use regex::Regex;
use std::sync::OnceLock;

pub const MINUTES_PER_DAY: i64 = 1440;

/// Matches one clock time, 24h or 12h, with an optional AM/PM suffix.
/// Biometric exports concatenate several times in one cell
/// ("06:3912:0012:1617:01"), so the pattern is written to be scanned
/// repeatedly with non-overlapping matches.
fn clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([01]?\d|2[0-3]):([0-5]\d)\s*([AaPp])?\.?[Mm]?\.?").unwrap()
    })
}

fn anchored_clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([01]?\d|2[0-3]):([0-5]\d)\s*(?:([AaPp])\.?[Mm]\.?)?\s*$").unwrap()
    })
}

fn to_minute(hour: i64, minute: i64, meridiem: Option<char>) -> Option<i64> {
    let hour = match meridiem {
        Some('a') | Some('A') => {
            if hour > 12 {
                return None;
            }
            hour % 12
        }
        Some('p') | Some('P') => {
            if hour > 12 {
                return None;
            }
            hour % 12 + 12
        }
        _ => hour,
    };
    Some(hour * 60 + minute)
}

/// Parse a full string as a single HH:MM time (strict: nothing but the time
/// and optional AM/PM may be present). Returns the minute of day.
pub fn parse_hhmm(s: &str) -> Option<i64> {
    let caps = anchored_clock_re().captures(s)?;
    let hour: i64 = caps.get(1)?.as_str().parse().ok()?;
    let minute: i64 = caps.get(2)?.as_str().parse().ok()?;
    let meridiem = caps.get(3).and_then(|m| m.as_str().chars().next());
    to_minute(hour, minute, meridiem)
}

/// Extract every clock time embedded in free-form cell text, in encounter
/// order. Malformed fragments are skipped, never reported.
pub fn extract_clock_times(text: &str) -> Vec<i64> {
    let mut out = Vec::new();
    for caps in clock_re().captures_iter(text) {
        let hour: i64 = match caps.get(1).and_then(|m| m.as_str().parse().ok()) {
            Some(h) => h,
            None => continue,
        };
        let minute: i64 = match caps.get(2).and_then(|m| m.as_str().parse().ok()) {
            Some(m) => m,
            None => continue,
        };
        let meridiem = caps.get(3).and_then(|m| m.as_str().chars().next());
        if let Some(m) = to_minute(hour, minute, meridiem) {
            out.push(m);
        }
    }
    out
}

/// Format a minute-of-day as HH:MM. Minute 1440 renders as "24:00" so that a
/// segment closed at midnight keeps its ordering when displayed.
pub fn format_minute_of_day(min: i64) -> String {
    if min == MINUTES_PER_DAY {
        return "24:00".to_string();
    }
    let m = min.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Format a signed duration in minutes as [-]HH:MM.
pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}
