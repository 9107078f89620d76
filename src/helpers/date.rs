//! Date helper functions

use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;

/// Clock display format, `2024/01/15 09:05:03`
pub const CLOCK_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Format a date for the page clock
pub fn clock<T: TimeZone>(date: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    date.format(CLOCK_FORMAT).to_string()
}

/// Format `now` for the page clock in the named IANA timezone.
///
/// An empty name means local time. Unknown names are logged and fall back
/// to local time.
pub fn clock_in(now: DateTime<Utc>, timezone: &str) -> String {
    let timezone = timezone.trim();
    if timezone.is_empty() {
        return clock(&now.with_timezone(&Local));
    }

    match timezone.parse::<Tz>() {
        Ok(tz) => clock(&now.with_timezone(&tz)),
        Err(e) => {
            tracing::warn!("Unknown clock timezone {:?}: {}", timezone, e);
            clock(&now.with_timezone(&Local))
        }
    }
}
