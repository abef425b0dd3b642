//! Bounded neighborhood search shared by the two layout strategies. Both
//! layouts anchor on a label cell ("User ID:", "Name:", "ID:") and read the
//! actual value from a nearby cell, so the walk and the content validators
//! live here instead of ad hoc nested loops.

pub fn cell<'a>(grid: &'a [Vec<String>], row: usize, col: usize) -> &'a str {
    grid.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .unwrap_or("")
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// True when the cell carries the given label: the cell text equals the
/// label, or continues with a colon ("ID:", "ID ：", "ID: 1042").
pub fn matches_label(cell_text: &str, label: &str) -> bool {
    let text = normalize(cell_text);
    let label = normalize(label);
    if !text.starts_with(&label) {
        return false;
    }
    let rest = text[label.len()..].trim_start();
    rest.is_empty() || rest.starts_with(':') || rest.starts_with('：')
}

/// Value embedded in the label cell itself ("ID:1042" -> "1042").
pub fn inline_value(cell_text: &str) -> Option<String> {
    let idx = cell_text.find([':', '：'])?;
    let value = cell_text[idx..]
        .trim_start_matches([':', '：'])
        .trim()
        .to_string();
    if value.is_empty() { None } else { Some(value) }
}

/// Locate the first cell in `rows` matching any of the labels, scanning in
/// reading order.
pub fn find_label(
    grid: &[Vec<String>],
    rows: std::ops::Range<usize>,
    labels: &[&str],
) -> Option<(usize, usize)> {
    for r in rows {
        let row = grid.get(r)?;
        for (c, text) in row.iter().enumerate() {
            if labels.iter().any(|l| matches_label(text, l)) {
                return Some((r, c));
            }
        }
    }
    None
}

/// From a label anchor, return the first nearby value the validator
/// accepts: the label cell's own inline value first, then cells up to
/// `rows_tol` rows below and `cols_tol` columns right, in reading order.
pub fn find_value_near(
    grid: &[Vec<String>],
    row: usize,
    col: usize,
    rows_tol: usize,
    cols_tol: usize,
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    if let Some(v) = inline_value(cell(grid, row, col))
        && accept(&v)
    {
        return Some(v);
    }

    for dr in 0..=rows_tol {
        for dc in 0..=cols_tol {
            if dr == 0 && dc == 0 {
                continue;
            }
            let raw = cell(grid, row + dr, col + dc).trim();
            if accept(raw) {
                return Some(raw.to_string());
            }
            if let Some(v) = inline_value(raw)
                && accept(&v)
            {
                return Some(v);
            }
        }
    }
    None
}

/// Find a run of adjacent cells literally reading "1","2","3",... in order.
/// Returns (start column, run length) for the first run reaching `min_len`.
/// Both layouts use this to locate their day-number header row.
pub fn day_number_run(row: &[String], min_len: usize) -> Option<(usize, usize)> {
    let mut c = 0;
    while c < row.len() {
        if row[c].trim() == "1" {
            let mut len = 1;
            while c + len < row.len() && row[c + len].trim() == (len + 1).to_string() {
                len += 1;
            }
            if len >= min_len {
                return Some((c, len));
            }
            c += len;
        } else {
            c += 1;
        }
    }
    None
}

/// Grid-report employee ids are digit-only badge numbers of at least five
/// digits.
pub fn is_employee_id(s: &str) -> bool {
    let s = s.trim();
    s.len() >= 5 && s.chars().all(|c| c.is_ascii_digit())
}

/// Loose token validator for the legacy layout, where ids can be short.
pub fn is_token(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && !s.contains([':', '：'])
}

/// Name/department cells: non-empty text, not another label.
pub fn is_text_value(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && !s.ends_with([':', '：']) && s.chars().any(|c| c.is_alphabetic())
}
