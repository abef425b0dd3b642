//! Workbook cell-grid reader. Every sheet is flattened to trimmed strings:
//! the layout detectors only ever look at values, never styles.

use crate::errors::{AppError, AppResult};
use calamine::{Data, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use chrono::{Days, NaiveDate};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

pub type SheetGrid = Vec<Vec<String>>;

pub fn read_sheets_from_path(path: &Path) -> AppResult<Vec<(String, SheetGrid)>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !matches!(ext.as_str(), "xls" | "xlsx" | "xlsm") {
        return Err(AppError::UnsupportedFormat(ext));
    }
    let mut workbook = open_workbook_auto(path)?;
    read_all(&mut workbook)
}

pub fn read_sheets_from_bytes(bytes: &[u8]) -> AppResult<Vec<(String, SheetGrid)>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)?;
    read_all(&mut workbook)
}

fn read_all<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> AppResult<Vec<(String, SheetGrid)>> {
    let names = workbook.sheet_names().to_owned();
    if names.is_empty() {
        return Err(AppError::Workbook("workbook has no sheets".to_string()));
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let grid: SheetGrid = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        sheets.push((name, grid));
    }
    Ok(sheets)
}

/// Render one cell as the text the layout detectors expect: day numbers
/// without a trailing ".0", Excel clock fractions and datetime serials as
/// HH:MM so embedded punch times survive the flattening.
fn cell_to_string(v: &Data) -> String {
    match v {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{f:.0}")
            } else if *f > 0.0 && *f < 1.0 {
                clock_fraction_to_hhmm(*f)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Data::DateTime(serial) => excel_serial_to_string(serial.as_f64()),
        Data::DateTimeIso(s) => s.trim().to_string(),
        Data::DurationIso(s) => s.trim().to_string(),
        Data::Error(_) => String::new(),
    }
}

fn clock_fraction_to_hhmm(fraction: f64) -> String {
    let minutes = (fraction * 1440.0).round() as i64 % 1440;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn excel_serial_to_string(serial: f64) -> String {
    if serial > 0.0 && serial < 1.0 {
        return clock_fraction_to_hhmm(serial);
    }

    let days = serial.floor() as i64;
    let frac = serial - serial.floor();

    // The 1899-12-30 epoch absorbs Excel's phantom 1900-02-29 for serials
    // past it; earlier serials sit one day short of that epoch.
    let base = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let mut date = base + Days::new(days.max(0) as u64);
    if days < 60 {
        date = date + Days::new(1);
    }

    if frac > 0.0 {
        let minutes = (frac * 1440.0).round() as i64 % 1440;
        format!(
            "{} {:02}:{:02}",
            date.format("%Y-%m-%d"),
            minutes / 60,
            minutes % 60
        )
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}
