//! Festival calendar helpers used by the home page and reminders.

use chrono::NaiveDate;

use crate::model::{same_religion, Festival};

/// Pick the festival to feature for a day.
///
/// Prefers the first festival of `religion` when one is given; otherwise (or
/// when none match) the first festival in the list.
pub fn pick_today<'a>(festivals: &'a [Festival], religion: Option<&str>) -> Option<&'a Festival> {
    religion
        .and_then(|religion| {
            festivals
                .iter()
                .find(|f| same_religion(&f.religion, religion))
        })
        .or_else(|| festivals.first())
}

/// Whole days from `today` until `date`; negative once the date has passed.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// True when the festival falls between today and `reminder_days` from now,
/// inclusive on both ends.
pub fn reminder_due(festival: &Festival, today: NaiveDate, reminder_days: i32) -> bool {
    let days = days_until(festival.date, today);
    days >= 0 && days <= i64::from(reminder_days)
}

/// Normalize a religion filter from a query string. Blank values and the
/// client's `all` choice mean "no filter".
pub fn religion_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case("all"))
}
