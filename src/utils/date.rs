use chrono::NaiveDate;

/// Build a date from a (year, month) context plus a day-of-month column
/// label. None when the day does not exist in that month.
pub fn date_from_day_of_month(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
