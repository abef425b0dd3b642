//! Legacy narrow layout: each employee block carries its own day-number
//! header row ("1","2","3",... across adjacent columns), with the employee's
//! "User ID:"/"Name:" label cells somewhere above it and punch times in the
//! rows below, one column per day of month.

use super::{BlockBuilder, ParseLog, SheetYield, month, scan, sheet::SheetGrid};
use crate::errors::AppResult;
use crate::models::punch::Layout;
use crate::utils::time::extract_clock_times;

/// A legacy header needs at least "1","2","3" to count as a day run.
const MIN_DAY_RUN: usize = 3;
/// A month never has more day columns than this.
const MAX_DAYS: usize = 31;

/// Nearest preceding label above the header row, without crossing into the
/// previous block; the value sits inline or within a few cells to the right.
fn label_value_above(
    grid: &SheetGrid,
    from_row: usize,
    header_row: usize,
    labels: &[&str],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    for r in (from_row..header_row).rev() {
        for (c, text) in grid.get(r)?.iter().enumerate() {
            if labels.iter().any(|l| scan::matches_label(text, l)) {
                return scan::find_value_near(grid, r, c, 0, 3, &accept);
            }
        }
    }
    None
}

/// Data rows end at the next header row or the next "User ID:" marker,
/// whichever comes first.
fn block_data_end(grid: &SheetGrid, header_row: usize, next_header: usize) -> usize {
    for (offset, row) in grid[header_row + 1..next_header].iter().enumerate() {
        if row.iter().any(|t| scan::matches_label(t, "user id")) {
            return header_row + 1 + offset;
        }
    }
    next_header
}

pub(crate) fn parse_sheet(
    sheet_name: &str,
    grid: &SheetGrid,
    file_name: Option<&str>,
    log: &mut ParseLog,
) -> AppResult<Option<SheetYield>> {
    let mut headers = Vec::new();
    for (r, row) in grid.iter().enumerate() {
        if let Some((c, len)) = scan::day_number_run(row, MIN_DAY_RUN) {
            headers.push((r, c, len.min(MAX_DAYS)));
        }
    }
    if headers.is_empty() {
        return Ok(None);
    }

    let (year, month_num) = month::infer_month(grid, headers[0].0, sheet_name)?;

    let mut records = Vec::new();
    for (i, &(header_row, start_col, day_count)) in headers.iter().enumerate() {
        let next_header = headers
            .get(i + 1)
            .map(|&(r, _, _)| r)
            .unwrap_or(grid.len());
        let labels_from = if i == 0 { 0 } else { headers[i - 1].0 + 1 };

        let token = label_value_above(grid, labels_from, header_row, &["user id"], scan::is_token);
        let name = label_value_above(grid, labels_from, header_row, &["name"], scan::is_text_value);
        if token.is_none() && name.is_none() {
            log.notes.push(format!(
                "sheet '{}': skipped day header at row {} with no User ID/Name labels above it",
                sheet_name,
                header_row + 1
            ));
            continue;
        }
        let name = name.unwrap_or_default();
        let token = token.unwrap_or_else(|| name.clone());

        let mut block = BlockBuilder::new(token, name, None);
        let data_end = block_data_end(grid, header_row, next_header);
        for row_idx in header_row + 1..data_end {
            for d in 0..day_count {
                let text = scan::cell(grid, row_idx, start_col + d);
                for minute in extract_clock_times(text) {
                    block.add_time((d + 1) as u32, minute, file_name);
                }
            }
        }

        if block.is_empty() {
            continue;
        }
        records.extend(block.into_records(year, month_num, Layout::Legacy, file_name, log));
    }

    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(SheetYield {
        records,
        month: (year, month_num),
        layout: Layout::Legacy,
    }))
}
