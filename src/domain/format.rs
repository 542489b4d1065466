//! Display formatting for dates, times, relative ages and follower counts.
//!
//! All functions are total: unparseable input is echoed back (dates, times) or
//! rendered as an empty string (ages) rather than failing, since the backend's
//! values are not trustworthy enough to justify an error path.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Formats an ISO calendar date (`2026-08-08`) as `Aug 8, 2026`.
///
/// # Examples
///
/// ```
/// use eventscout::domain::format::format_date;
///
/// assert_eq!(format_date("2026-08-08"), "Aug 8, 2026");
/// assert_eq!(format_date("TBA"), "TBA");
/// assert_eq!(format_date(""), "");
/// ```
#[must_use]
pub fn format_date(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_or_else(|_| date.to_string(), |d| d.format("%b %-d, %Y").to_string())
}

/// Formats a date like [`format_date`] but drops the year when it equals `current_year`.
#[must_use]
pub fn format_date_short(date: &str, current_year: i32) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(d) if d.year() == current_year => d.format("%b %-d").to_string(),
        Ok(d) => d.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Formats a 24-hour clock time (`HH:mm` or `HH:mm:ss`) as `h:mm AM/PM`.
///
/// Midnight renders as `12:xx AM`, noon as `12:xx PM`.
///
/// # Examples
///
/// ```
/// use eventscout::domain::format::format_time;
///
/// assert_eq!(format_time("19:00:00"), "7:00 PM");
/// assert_eq!(format_time("00:15"), "12:15 AM");
/// assert_eq!(format_time("12:30:00"), "12:30 PM");
/// ```
#[must_use]
pub fn format_time(time: &str) -> String {
    let trimmed = time.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_or_else(|_| time.to_string(), |t| t.format("%-I:%M %p").to_string())
}

/// Parses a favorite's added-at marker into a UTC instant.
///
/// Accepts epoch milliseconds (as a number or numeric string) and RFC 3339 /
/// ISO-8601 timestamps such as `2025-01-01T10:00:00.000Z`.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(millis) = raw.parse::<i64>() {
        return Utc.timestamp_millis_opt(millis).single();
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Describes how long before `now` the instant `then` was.
///
/// Uses the largest whole unit: days, then hours, minutes, seconds. Future
/// instants clamp to `0 seconds ago`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use eventscout::domain::format::time_ago;
///
/// let now = Utc::now();
/// assert_eq!(time_ago(now - Duration::hours(1), now), "1 hour ago");
/// assert_eq!(time_ago(now - Duration::days(3), now), "3 days ago");
/// ```
#[must_use]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - then).num_seconds().max(0);

    if diff >= SECONDS_PER_DAY {
        plural(diff / SECONDS_PER_DAY, "day")
    } else if diff >= SECONDS_PER_HOUR {
        plural(diff / SECONDS_PER_HOUR, "hour")
    } else if diff >= SECONDS_PER_MINUTE {
        plural(diff / SECONDS_PER_MINUTE, "minute")
    } else {
        plural(diff, "second")
    }
}

/// Abbreviates a follower count: `1.2M`, `3.4K`, or the plain number.
#[must_use]
pub fn format_followers(count: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let value = count as f64;
    if count >= 1_000_000 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Formats a count with comma thousands separators (`1,234,567`).
#[must_use]
pub fn format_with_commas(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn short_date_drops_current_year_only() {
        assert_eq!(format_date_short("2026-08-08", 2026), "Aug 8");
        assert_eq!(format_date_short("2027-01-15", 2026), "Jan 15, 2027");
        assert_eq!(format_date_short("soon", 2026), "soon");
    }

    #[test]
    fn time_keeps_garbage_verbatim() {
        assert_eq!(format_time("evening"), "evening");
        assert_eq!(format_time(""), "");
        assert_eq!(format_time("09:05"), "9:05 AM");
    }

    #[test]
    fn timestamps_accept_millis_and_iso() {
        let from_millis = parse_timestamp("1735725600000").unwrap();
        let from_iso = parse_timestamp("2025-01-01T10:00:00.000Z").unwrap();
        assert_eq!(from_millis, from_iso);
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn time_ago_singular_and_plural() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(1), now), "1 second ago");
        assert_eq!(time_ago(now - Duration::seconds(42), now), "42 seconds ago");
        assert_eq!(time_ago(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(time_ago(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(time_ago(now - Duration::days(1), now), "1 day ago");
        assert_eq!(time_ago(now + Duration::minutes(5), now), "0 seconds ago");
    }

    #[test]
    fn follower_counts() {
        assert_eq!(format_followers(1_234_567), "1.2M");
        assert_eq!(format_followers(3_400), "3.4K");
        assert_eq!(format_followers(999), "999");
        assert_eq!(format_with_commas(1_234_567), "1,234,567");
        assert_eq!(format_with_commas(100), "100");
        assert_eq!(format_with_commas(0), "0");
    }
}
