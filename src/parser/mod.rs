//! Dual-format spreadsheet parser: locates employee attendance blocks in a
//! workbook (legacy narrow layout or grid-report wide layout) and extracts
//! normalized punch times per employee per calendar day.

pub mod grid;
pub mod legacy;
pub mod month;
pub mod scan;
pub mod sheet;

use crate::errors::{AppError, AppResult};
use crate::models::day_record::DayRecord;
use crate::models::punch::{Layout, Punch};
use crate::utils::date::date_from_day_of_month;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// How many offending samples a recovered-and-warned issue keeps.
const WARNING_SAMPLE_CAP: usize = 10;

#[derive(Debug, Default)]
pub struct SampledIssue {
    pub count: usize,
    pub samples: Vec<String>,
}

impl SampledIssue {
    pub fn push(&mut self, sample: impl Into<String>) {
        self.count += 1;
        if self.samples.len() < WARNING_SAMPLE_CAP {
            self.samples.push(sample.into());
        }
    }

    fn message(&self, what: &str) -> Option<String> {
        if self.count == 0 {
            return None;
        }
        Some(format!(
            "{} {} (samples: {})",
            self.count,
            what,
            self.samples.join(", ")
        ))
    }
}

/// Warning accumulator threaded through a parse pass; returned with the
/// result instead of living in any ambient collector.
#[derive(Debug, Default)]
pub struct ParseLog {
    pub invalid_dates: SampledIssue,
    pub empty_sections: SampledIssue,
    pub notes: Vec<String>,
}

impl ParseLog {
    pub fn messages(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(m) = self.invalid_dates.message("invalid calendar date(s) dropped") {
            out.push(m);
        }
        if let Some(m) = self.empty_sections.message("empty attendance section(s)") {
            out.push(m);
        }
        out.extend(self.notes.iter().cloned());
        out
    }
}

/// Everything one parsed workbook yields, plus summary stats for display.
#[derive(Debug)]
pub struct ParsedWorkbook {
    pub file_name: Option<String>,
    pub records: Vec<DayRecord>,
    pub warnings: Vec<String>,
    /// Distinct (year, month) contexts detected, in sheet order.
    pub month_hints: Vec<(i32, u32)>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub employee_count: usize,
    pub punch_count: usize,
    pub layouts: BTreeSet<Layout>,
}

/// What one sheet contributes: built records plus the month context the
/// layout detector pinned down.
pub(crate) struct SheetYield {
    pub records: Vec<DayRecord>,
    pub month: (i32, u32),
    pub layout: Layout,
}

/// One employee block while a sheet is being scanned: punches bucketed per
/// day-of-month, deduplicated by minute. Discarded once records are built.
pub(crate) struct BlockBuilder {
    pub token: String,
    pub name: String,
    pub department: Option<String>,
    days: BTreeMap<u32, BTreeMap<i64, Punch>>,
    punch_count: usize,
}

impl BlockBuilder {
    pub fn new(token: String, name: String, department: Option<String>) -> Self {
        Self {
            token,
            name,
            department,
            days: BTreeMap::new(),
            punch_count: 0,
        }
    }

    /// Insert one punch; a second occurrence at the same minute collapses
    /// into the existing punch and marks it merged.
    pub fn add_time(&mut self, day: u32, minute: i64, source: Option<&str>) {
        let slot = self.days.entry(day).or_default();
        match slot.get_mut(&minute) {
            Some(existing) => existing.absorb(source),
            None => {
                slot.insert(minute, Punch::new(minute, source));
                self.punch_count += 1;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.punch_count == 0
    }

    /// Label used in warnings about this block.
    pub fn display_label(&self) -> String {
        if !self.name.is_empty() {
            self.name.clone()
        } else if !self.token.is_empty() {
            self.token.clone()
        } else {
            "<unnamed>".to_string()
        }
    }

    /// Materialize day records against the inferred month. Days that do not
    /// exist in that month are dropped with a sampled warning.
    pub fn into_records(
        self,
        year: i32,
        month: u32,
        layout: Layout,
        file_name: Option<&str>,
        log: &mut ParseLog,
    ) -> Vec<DayRecord> {
        let mut source_files = BTreeSet::new();
        if let Some(f) = file_name {
            source_files.insert(f.to_string());
        }
        let mut layouts = BTreeSet::new();
        layouts.insert(layout);

        let mut records = Vec::new();
        for (day, punches) in self.days {
            if punches.is_empty() {
                continue;
            }
            let Some(date) = date_from_day_of_month(year, month, day) else {
                log.invalid_dates
                    .push(format!("{year}-{month:02}-{day:02} ({})", self.token));
                continue;
            };
            records.push(DayRecord {
                employee_token: self.token.clone(),
                display_name: self.name.clone(),
                department: self.department.clone(),
                date,
                punches: punches.into_values().collect(),
                source_files: source_files.clone(),
                layouts: layouts.clone(),
                synthesized_date: true,
            });
        }
        records
    }
}

/// Parse a workbook from disk.
pub fn parse_workbook_file(path: &Path) -> AppResult<ParsedWorkbook> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string());
    let sheets = sheet::read_sheets_from_path(path)?;
    parse_sheets(sheets, file_name)
}

/// Parse a workbook already held in memory (upload plumbing hands us bytes).
pub fn parse_workbook_bytes(bytes: &[u8], file_name: Option<&str>) -> AppResult<ParsedWorkbook> {
    let sheets = sheet::read_sheets_from_bytes(bytes)?;
    parse_sheets(sheets, file_name.map(str::to_string))
}

fn parse_sheets(
    sheets: Vec<(String, sheet::SheetGrid)>,
    file_name: Option<String>,
) -> AppResult<ParsedWorkbook> {
    let mut log = ParseLog::default();
    let mut records = Vec::new();
    let mut month_hints = Vec::new();
    let mut layouts = BTreeSet::new();

    for (name, grid_cells) in &sheets {
        let outcome = if grid::sheet_name_matches(name) || grid::probe(grid_cells) {
            grid::parse_sheet(name, grid_cells, file_name.as_deref(), &mut log)?
        } else {
            legacy::parse_sheet(name, grid_cells, file_name.as_deref(), &mut log)?
        };

        if let Some(yielded) = outcome {
            layouts.insert(yielded.layout);
            if !month_hints.contains(&yielded.month) {
                month_hints.push(yielded.month);
            }
            records.extend(yielded.records);
        }
    }

    if records.is_empty() {
        let label = file_name.unwrap_or_else(|| "workbook".to_string());
        return Err(AppError::NoAttendanceSection(label));
    }

    let employee_count = records
        .iter()
        .map(|r| r.employee_token.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let punch_count = records.iter().map(|r| r.punches.len()).sum();
    let first_date = records.iter().map(|r| r.date).min();
    let last_date = records.iter().map(|r| r.date).max();

    Ok(ParsedWorkbook {
        file_name,
        records,
        warnings: log.messages(),
        month_hints,
        first_date,
        last_date,
        employee_count,
        punch_count,
        layouts,
    })
}
