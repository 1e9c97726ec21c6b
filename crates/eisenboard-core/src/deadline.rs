//! Start-by date derivation.
//!
//! A task due on `due` that needs `hours` of work must start
//! `ceil(hours / 8)` working days earlier.

use chrono::{Duration, NaiveDate};

/// Work hours that make up one day of effort.
pub const WORK_HOURS_PER_DAY: f64 = 8.0;

/// Latest date work can start and still meet `due`.
///
/// Missing inputs, a non-positive / non-finite estimate, or one so large the
/// date falls outside the calendar, give `None`.
pub fn start_by_date(due: Option<NaiveDate>, estimated_hours: Option<f64>) -> Option<NaiveDate> {
    let due = due?;
    let hours = estimated_hours.filter(|h| h.is_finite() && *h > 0.0)?;
    let days = (hours / WORK_HOURS_PER_DAY).ceil() as i64;
    due.checked_sub_signed(Duration::try_days(days)?)
}
