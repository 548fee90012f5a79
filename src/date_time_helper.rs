use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::{America::New_York, Tz};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateTimeError {
    #[error("Timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

/// Time zone in which the report is stamped
pub const REPORT_TZ: Tz = New_York;

/// Create UTC time from a UNIX epoch timestamp (i.e seconds since 1st Jan 1970)
pub fn unix_to_date_time(seconds: i64) -> Result<DateTime<Utc>, DateTimeError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or(DateTimeError::TimestampOutOfRange(seconds))
}

/// Current time in the report time zone
pub fn report_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&REPORT_TZ)
}

/// Header stamp, e.g. `2024-01-02 16:30 EST`
pub fn report_timestamp(time: &DateTime<Tz>) -> String {
    time.format("%Y-%m-%d %H:%M %Z").to_string()
}

/// Calendar date of the report in its own time zone
pub fn report_date(time: &DateTime<Tz>) -> NaiveDate {
    time.date_naive()
}
