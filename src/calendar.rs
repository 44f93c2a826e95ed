use chrono::{Datelike as _, Days, NaiveDate, NaiveDateTime, Timelike as _};

const NOON_SECS: u32 = 12 * 60 * 60;

/// The Sunday a run-of-show prepared at `now` is for.
///
/// On a Sunday up to and including 12:00:00 that is today; any later point rolls over to the
/// following week.
pub fn next_sunday(now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    let days_ahead = (7 - today.weekday().num_days_from_sunday()) % 7;
    let days_ahead = if days_ahead == 0 && now.time().num_seconds_from_midnight() > NOON_SECS {
        7
    } else {
        days_ahead
    };
    today + Days::new(u64::from(days_ahead))
}

/// Run name as it appears in the spreadsheet: `YYYY-MM-DD`.
pub fn run_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Default run name from the local clock.
pub fn default_run_name() -> String {
    run_name(next_sunday(chrono::Local::now().naive_local()))
}

#[cfg(test)]
#[path = "../tests/unit/calendar.rs"]
mod tests;
