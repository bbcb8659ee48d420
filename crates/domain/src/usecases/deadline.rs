//! Listing deadline ("D-day") policy
//!
//! A free listing is visible for 7 days from creation; a paid listing for
//! its paid duration plus 7. The calculator fails soft: a missing or
//! unparseable creation timestamp yields "D-?" rather than an error.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::model::DeadlineStatus;

/// Visible window for free listings, and the grace added to paid ones
pub const FREE_WINDOW_DAYS: i64 = 7;

/// Compute the deadline status of a listing.
///
/// `elapsed` is `now.date() - created.date()` in whole days and is kept
/// un-clamped: a creation date in the future yields negative elapsed days
/// and a remaining value larger than the window.
pub fn deadline_status(
    created_at: Option<&str>,
    paid: Option<bool>,
    paid_days: Option<i64>,
    now: OffsetDateTime,
) -> DeadlineStatus {
    let Some(created) = created_at.and_then(parse_timestamp) else {
        return DeadlineStatus::Unknown;
    };

    let window = match (paid, paid_days) {
        (Some(true), Some(days)) => days + FREE_WINDOW_DAYS,
        _ => FREE_WINDOW_DAYS,
    };

    let elapsed =
        i64::from(now.date().to_julian_day()) - i64::from(created.date().to_julian_day());
    let remaining = window - elapsed;

    if remaining < 0 {
        DeadlineStatus::Expired
    } else {
        DeadlineStatus::DaysRemaining(remaining)
    }
}

/// Deadline status as the UI label ("D-3", "마감", "D-?")
pub fn dday_status(
    created_at: Option<&str>,
    paid: Option<bool>,
    paid_days: Option<i64>,
    now: OffsetDateTime,
) -> String {
    deadline_status(created_at, paid, paid_days, now).label()
}

/// Parse a backend timestamp: RFC 3339 first, then a bare date prefix.
/// Date-only values land at midnight UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }

    let date_format = format_description!("[year]-[month]-[day]");
    let prefix: String = raw.chars().take(10).collect();
    Date::parse(&prefix, &date_format)
        .ok()
        .map(|date| date.midnight().assume_utc())
}
