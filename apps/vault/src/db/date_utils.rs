//! Date utilities for daily reset hour handling.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Timelike, Utc};

/// Get the study day `now` falls on, given `daily_reset_hour`.
///
/// Before the reset hour the study day is still "yesterday", so late-night
/// sessions count towards the previous day.
pub fn study_day<Tz: TimeZone>(now: DateTime<Tz>, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now - Duration::days(1)).date_naive()
    } else {
        now.date_naive()
    }
}

/// UTC instant at which the current local study day began.
pub fn start_of_study_day(now: DateTime<Utc>, daily_reset_hour: u32) -> DateTime<Utc> {
    let local = now.with_timezone(&Local);
    let day = study_day(local, daily_reset_hour);
    let start = day
        .and_hms_opt(daily_reset_hour.min(23), 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest());
    // Inside a DST gap the reset instant does not exist locally; use a plain 24h window.
    start
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| now - Duration::days(1))
}
