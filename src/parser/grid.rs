//! Grid-report wide layout: one day-number header row for the whole sheet
//! (a month of columns), then employee blocks demarcated by "ID:" label
//! cells, each block holding ID/Name/Dept cells and punch times stacked in
//! the day columns. A single day cell may carry several concatenated times.

use super::{BlockBuilder, ParseLog, SheetYield, month, scan, sheet::SheetGrid};
use crate::errors::AppResult;
use crate::models::punch::Layout;
use crate::utils::time::extract_clock_times;

/// A grid-report header is a run of at least this many consecutive day
/// labels; that both confirms the layout and maps day -> column.
const MIN_DAY_RUN: usize = 20;
/// The header row sits within the leading rows of the sheet.
const HEADER_SCAN_ROWS: usize = 20;
const MAX_DAYS: usize = 31;
/// ID/Name/Dept values sit within this neighborhood of their label cell.
const META_ROWS_TOL: usize = 6;
const META_COLS_TOL: usize = 3;

/// Sheet names the device firmware gives this report.
pub fn sheet_name_matches(name: &str) -> bool {
    let n = name.to_lowercase();
    n.contains("att. log report") || n.contains("att.log report") || n.contains("attendance record report")
}

fn find_header(grid: &SheetGrid) -> Option<(usize, usize, usize)> {
    for (r, row) in grid.iter().enumerate().take(HEADER_SCAN_ROWS) {
        if let Some((c, len)) = scan::day_number_run(row, MIN_DAY_RUN) {
            return Some((r, c, len.min(MAX_DAYS)));
        }
    }
    None
}

fn id_anchors(grid: &SheetGrid, header_row: usize) -> Vec<(usize, usize)> {
    let mut anchors = Vec::new();
    for (r, row) in grid.iter().enumerate().skip(header_row + 1) {
        for (c, text) in row.iter().enumerate() {
            // "User ID:" belongs to the legacy layout and must not anchor here
            if scan::matches_label(text, "id") {
                anchors.push((r, c));
                break;
            }
        }
    }
    anchors
}

/// Structural probe for sheets whose name does not give the layout away.
pub fn probe(grid: &SheetGrid) -> bool {
    match find_header(grid) {
        Some((header_row, _, _)) => !id_anchors(grid, header_row).is_empty(),
        None => false,
    }
}

fn label_value_in_block(
    grid: &SheetGrid,
    rows: std::ops::Range<usize>,
    labels: &[&str],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    let (r, c) = scan::find_label(grid, rows, labels)?;
    scan::find_value_near(grid, r, c, META_ROWS_TOL, META_COLS_TOL, accept)
}

pub(crate) fn parse_sheet(
    sheet_name: &str,
    grid: &SheetGrid,
    file_name: Option<&str>,
    log: &mut ParseLog,
) -> AppResult<Option<SheetYield>> {
    let Some((header_row, start_col, day_count)) = find_header(grid) else {
        return Ok(None);
    };
    let (year, month_num) = month::infer_month(grid, header_row, sheet_name)?;

    let anchors = id_anchors(grid, header_row);
    if anchors.is_empty() {
        return Ok(None);
    }

    let mut records = Vec::new();
    for (i, &(anchor_row, anchor_col)) in anchors.iter().enumerate() {
        let block_end = anchors
            .get(i + 1)
            .map(|&(r, _)| r)
            .unwrap_or(grid.len());
        let meta_end = (anchor_row + META_ROWS_TOL + 1).min(block_end);

        let token = scan::find_value_near(
            grid,
            anchor_row,
            anchor_col,
            META_ROWS_TOL,
            META_COLS_TOL,
            scan::is_employee_id,
        );
        let Some(token) = token else {
            log.notes.push(format!(
                "sheet '{}': skipped block at row {} without a readable employee id",
                sheet_name,
                anchor_row + 1
            ));
            continue;
        };
        let name = label_value_in_block(
            grid,
            anchor_row..meta_end,
            &["name"],
            scan::is_text_value,
        )
        .unwrap_or_default();
        let department = label_value_in_block(
            grid,
            anchor_row..meta_end,
            &["dept", "department"],
            scan::is_text_value,
        );

        let mut block = BlockBuilder::new(token, name, department);
        for day in 1..=day_count as u32 {
            let col = start_col + day as usize - 1;
            for row_idx in anchor_row..block_end {
                for minute in extract_clock_times(scan::cell(grid, row_idx, col)) {
                    block.add_time(day, minute, file_name);
                }
            }
        }

        if block.is_empty() {
            log.empty_sections.push(block.display_label());
            continue;
        }
        records.extend(block.into_records(year, month_num, Layout::GridReport, file_name, log));
    }

    Ok(Some(SheetYield {
        records,
        month: (year, month_num),
        layout: Layout::GridReport,
    }))
}
