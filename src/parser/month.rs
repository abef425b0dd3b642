//! Month/year inference. Neither layout stores a full date per punch; the
//! month context is reconstructed from date-like cells in a window of rows
//! around the located header row.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Rows scanned above and below the header row for date-like cells.
pub const MONTH_SCAN_RADIUS: usize = 10;

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap())
}

fn us_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap())
}

fn month_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s*(?:(\d{1,2})\s*,\s*)?(\d{4})\b",
        )
        .unwrap()
    })
}

fn month_index(prefix: &str) -> Option<u32> {
    let idx = match prefix.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(idx)
}

fn plausible(year: i32, month: u32, day: Option<u32>) -> bool {
    (1970..=2100).contains(&year)
        && (1..=12).contains(&month)
        && day.is_none_or(|d| (1..=31).contains(&d))
}

/// Every (year, month) candidate a single cell's text yields. A cell can
/// carry several (date-range headers tally their month twice).
pub fn cell_candidates(text: &str) -> Vec<(i32, u32)> {
    let mut out = Vec::new();

    for caps in iso_re().captures_iter(text) {
        let year: i32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let day: u32 = caps[3].parse().unwrap_or(0);
        if plausible(year, month, Some(day)) {
            out.push((year, month));
        }
    }

    for caps in us_re().captures_iter(text) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        let year: i32 = caps[3].parse().unwrap_or(0);
        if plausible(year, month, Some(day)) {
            out.push((year, month));
        }
    }

    for caps in month_name_re().captures_iter(text) {
        let Some(month) = month_index(&caps[1]) else {
            continue;
        };
        let day: Option<u32> = caps.get(2).and_then(|m| m.as_str().parse().ok());
        let year: i32 = caps[3].parse().unwrap_or(0);
        if plausible(year, month, day) {
            out.push((year, month));
        }
    }

    out
}

/// Tally candidates around the header row and pick the most frequent
/// (year, month); frequency ties break to the lexically smallest pair. No
/// candidate at all is a hard parse error for the sheet.
pub fn infer_month(
    grid: &[Vec<String>],
    header_row: usize,
    sheet_name: &str,
) -> AppResult<(i32, u32)> {
    let lo = header_row.saturating_sub(MONTH_SCAN_RADIUS);
    let hi = (header_row + MONTH_SCAN_RADIUS + 1).min(grid.len());

    let mut tally: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for row in &grid[lo..hi] {
        for text in row {
            for candidate in cell_candidates(text) {
                *tally.entry(candidate).or_insert(0) += 1;
            }
        }
    }

    tally
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(key, _)| key)
        .ok_or_else(|| AppError::NoMonthContext(sheet_name.to_string()))
}
