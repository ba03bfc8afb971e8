//! Date slot resolution.
//!
//! "Today" is the server's local date, not the caller's.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Resolve the optional `day` slot to a calendar date.
///
/// Reads `YYYY-MM-D` from the start of the slot, with or without zero
/// padding; anything after the day is ignored. Months and days past the end
/// roll over, so `2024-02-30` is March 1. Absent or unparsable input falls
/// back to `today`.
pub fn resolve_date(slot: Option<&str>, today: NaiveDate) -> NaiveDate {
    slot.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| match parse_leading_date(s) {
            Some(date) => Some(date),
            None => {
                tracing::debug!(slot = %s, "Unparsable day slot, using today");
                None
            }
        })
        .unwrap_or(today)
}

fn parse_leading_date(text: &str) -> Option<NaiveDate> {
    let mut fields = text.splitn(3, '-');
    let year: i32 = fields.next()?.parse().ok()?;
    let month: u32 = fields.next()?.parse().ok()?;
    let rest = fields.next()?;
    let day_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let day: u32 = rest[..day_end].parse().ok()?;

    // Month 0 and day 0 step back, as a lenient calendar would.
    let first_of_year = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let first_of_month = match month {
        0 => first_of_year.checked_sub_months(Months::new(1))?,
        m => first_of_year.checked_add_months(Months::new(m - 1))?,
    };
    match day {
        0 => first_of_month.checked_sub_days(Days::new(1)),
        d => first_of_month.checked_add_days(Days::new(u64::from(d - 1))),
    }
}

/// `March 5` style rendering used in speech and card titles.
pub fn spoken_date(date: NaiveDate) -> String {
    format!("{} {}", date.format("%B"), date.day())
}
