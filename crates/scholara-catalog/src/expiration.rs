//! Expiration policy.
//!
//! A scholarship is shown only while its deadline is today or later.
//! Anything that prevents reading the deadline (missing eligibility
//! block, missing date, unparseable date) counts as expired.
//!
//! Deadlines are compared as calendar days in the local time zone. A
//! timestamp with an offset is reduced to the calendar day it names in
//! its own offset.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};
use scholara_core::models::scholarship::Scholarship;
use tracing::debug;

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a scraped deadline string.
///
/// RFC 3339 inputs keep their offset. Inputs without one are read as
/// UTC, and date-only inputs resolve to midnight.
pub fn parse_deadline(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Calendar day of the scholarship's deadline, if it has a usable one.
pub fn deadline_day(scholarship: &Scholarship) -> Option<NaiveDate> {
    let raw = scholarship.deadline_date()?;
    match parse_deadline(raw) {
        Some(dt) => Some(dt.date_naive()),
        None => {
            debug!(
                id = %scholarship.id,
                deadline = raw,
                "Unparseable deadline, treating scholarship as expired"
            );
            None
        }
    }
}

/// `true` when the deadline is missing, unparseable, or strictly before
/// `today`. A deadline equal to `today` is still active.
pub fn is_expired(scholarship: &Scholarship, today: NaiveDate) -> bool {
    match deadline_day(scholarship) {
        Some(deadline) => deadline < today,
        None => true,
    }
}

/// [`is_expired`] against the current local calendar day.
pub fn is_expired_now(scholarship: &Scholarship) -> bool {
    is_expired(scholarship, today())
}

/// Signed number of days from `today` to the deadline. Negative once
/// the deadline has passed.
pub fn days_until_deadline(scholarship: &Scholarship, today: NaiveDate) -> Option<i64> {
    deadline_day(scholarship).map(|d| (d - today).num_days())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
