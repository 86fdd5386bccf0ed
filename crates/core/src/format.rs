//! Display formatting for dashboard list views.
//!
//! These functions are pure and only used on the read side; nothing in the
//! write path depends on them.

use chrono::{DateTime, Datelike, Utc};

/// Render a timestamp as `"<Month> <day><ordinal>, <year>"` in UTC.
///
/// ```
/// use catalog_admin_core::format_date;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(format_date(&at), "January 1st, 2024");
/// ```
#[must_use]
pub fn format_date(at: &DateTime<Utc>) -> String {
    let day = at.day();
    format!(
        "{month} {day}{suffix}, {year}",
        month = at.format("%B"),
        suffix = ordinal_suffix(day),
        year = at.year(),
    )
}

/// English ordinal suffix for a day of the month (`st`, `nd`, `rd`, `th`).
#[must_use]
pub const fn ordinal_suffix(n: u32) -> &'static str {
    match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
