//! Human readable renderings of incident timestamps.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Format of dates further than a week away from now.
pub const DISTANT_DATE_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";
const TIME_FORMAT: &str = "%-I:%M %p";

/// Source of the current time.
pub trait Clock {
    /// Current time in the timezone timestamps should be displayed in.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock stopped at the given time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Offset-less date-time forms accepted by [`parse_timestamp`], extended and basic ISO 8601.
const LOCAL_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M%S",
    "%Y%m%dT%H%M",
];

/// Date forms accepted by [`parse_timestamp`]. The time is midnight.
const LOCAL_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Offset forms accepted by [`parse_timestamp`] besides RFC 3339 and RFC 2822.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y%m%dT%H%M%S%z",
];

/// Parses a feed timestamp.
///
/// RFC 3339, RFC 2822 and the common ISO 8601 forms are accepted: space or `T` separator, minute
/// or fractional second precision, date only, and the basic format (`20171022T084100`).
/// Timestamps without an offset are taken to be in the offset of `now`.
pub fn parse_timestamp(value: &str, now: &DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(timestamp) =
        DateTime::parse_from_rfc3339(value).or_else(|_| DateTime::parse_from_rfc2822(value))
    {
        return Some(timestamp);
    }

    if let Some(timestamp) = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
    {
        return Some(timestamp);
    }

    let naive = LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            LOCAL_DATE_FORMATS.iter().find_map(|format| {
                NaiveDate::parse_from_str(value, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
        })?;
    now.offset().from_local_datetime(&naive).single()
}

/// Renders the timestamp relative to the current day: `Today at 3:45 PM`, `Yesterday at ...`,
/// `Last Monday at ...`, `Tomorrow at ...`, `Monday at ...`. Timestamps more than a week away are
/// rendered with [`DISTANT_DATE_FORMAT`].
pub fn calendar(timestamp: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> String {
    let local = timestamp.with_timezone(now.offset()).naive_local();
    let start_of_today = now.naive_local().date().and_time(Default::default());
    let days = (local - start_of_today).num_seconds() as f64 / 86_400.0;

    let time = local.format(TIME_FORMAT);
    let weekday = local.format("%A");
    if days < -6.0 {
        local.format(DISTANT_DATE_FORMAT).to_string()
    } else if days < -1.0 {
        format!("Last {weekday} at {time}")
    } else if days < 0.0 {
        format!("Yesterday at {time}")
    } else if days < 1.0 {
        format!("Today at {time}")
    } else if days < 2.0 {
        format!("Tomorrow at {time}")
    } else if days < 7.0 {
        format!("{weekday} at {time}")
    } else {
        local.format(DISTANT_DATE_FORMAT).to_string()
    }
}

/// Renders the distance between the timestamp and now: `6 hours ago`, `in a day`.
///
/// Each unit is rounded, and a unit is used until the rounded value reaches the threshold of the
/// next one (45 seconds, 45 minutes, 22 hours, 26 days, 11 months).
pub fn from_now(timestamp: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> String {
    let diff: Duration = now.signed_duration_since(*timestamp);
    let future = diff < Duration::zero();
    let seconds_f = diff.num_milliseconds().abs() as f64 / 1000.0;

    let seconds = seconds_f.round();
    let minutes = (seconds_f / 60.0).round();
    let hours = (seconds_f / 3600.0).round();
    let days_f = seconds_f / 86_400.0;
    let days = days_f.round();
    let months = (days_f * 4800.0 / 146_097.0).round();
    let years = (days_f * 4800.0 / 146_097.0 / 12.0).round();

    let span = if seconds <= 44.0 {
        "a few seconds".to_string()
    } else if minutes <= 1.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes as i64)
    } else if hours <= 1.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours as i64)
    } else if days <= 1.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days as i64)
    } else if months <= 1.0 {
        "a month".to_string()
    } else if months < 11.0 {
        format!("{} months", months as i64)
    } else if years <= 1.0 {
        "a year".to_string()
    } else {
        format!("{} years", years as i64)
    };

    if future {
        format!("in {span}")
    } else {
        format!("{span} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    // Sunday afternoon.
    fn now() -> DateTime<FixedOffset> {
        ts("2017-10-22T15:00:00+11:00")
    }

    #[test]
    fn calendar_near_dates() {
        let now = now();

        assert_eq!(calendar(&ts("2017-10-22T08:41:00+11:00"), &now), "Today at 8:41 AM");
        assert_eq!(
            calendar(&ts("2017-10-21T20:05:00+11:00"), &now),
            "Yesterday at 8:05 PM"
        );
        assert_eq!(
            calendar(&ts("2017-10-18T10:00:00+11:00"), &now),
            "Last Wednesday at 10:00 AM"
        );
        assert_eq!(
            calendar(&ts("2017-10-23T10:00:00+11:00"), &now),
            "Tomorrow at 10:00 AM"
        );
        assert_eq!(
            calendar(&ts("2017-10-26T12:00:00+11:00"), &now),
            "Thursday at 12:00 PM"
        );
    }

    #[test]
    fn calendar_distant_dates() {
        let now = now();

        assert_eq!(
            calendar(&ts("2017-10-01T09:05:03+11:00"), &now),
            "01/10/2017 09:05:03 AM"
        );
        assert_eq!(
            calendar(&ts("2017-11-30T21:00:00+11:00"), &now),
            "30/11/2017 09:00:00 PM"
        );
    }

    #[test]
    fn calendar_uses_viewer_offset() {
        assert_eq!(calendar(&ts("2017-10-21T22:00:00Z"), &now()), "Today at 9:00 AM");
    }

    #[test]
    fn relative_past() {
        let now = now();
        let ago = |seconds: i64| from_now(&(now - Duration::seconds(seconds)), &now);

        assert_eq!(ago(10), "a few seconds ago");
        assert_eq!(ago(50), "a minute ago");
        assert_eq!(ago(90), "2 minutes ago");
        assert_eq!(ago(44 * 60), "44 minutes ago");
        assert_eq!(ago(50 * 60), "an hour ago");
        assert_eq!(ago(6 * 3600 + 19 * 60), "6 hours ago");
        assert_eq!(ago(23 * 3600), "a day ago");
        assert_eq!(ago(21 * 86_400), "21 days ago");
        assert_eq!(ago(30 * 86_400), "a month ago");
        assert_eq!(ago(100 * 86_400), "3 months ago");
        assert_eq!(ago(400 * 86_400), "a year ago");
        assert_eq!(ago(3 * 365 * 86_400), "3 years ago");
    }

    #[test]
    fn relative_future() {
        let now = now();
        assert_eq!(from_now(&(now + Duration::hours(19)), &now), "in 19 hours");
        assert_eq!(from_now(&(now + Duration::seconds(5)), &now), "in a few seconds");
    }

    #[test]
    fn parses_feed_timestamps() {
        let now = now();

        assert_eq!(
            parse_timestamp("2017-10-22T08:41:00+11:00", &now),
            Some(ts("2017-10-22T08:41:00+11:00"))
        );
        assert_eq!(
            parse_timestamp("Sat, 21 Oct 2017 21:41:00 GMT", &now),
            Some(ts("2017-10-22T08:41:00+11:00"))
        );
        assert_eq!(
            parse_timestamp("2017-10-22T08:41:00", &now),
            Some(ts("2017-10-22T08:41:00+11:00"))
        );
        assert_eq!(parse_timestamp("yesterday", &now), None);
    }

    #[test]
    fn parses_space_separator() {
        assert_eq!(
            parse_timestamp("2017-10-22 08:41:00", &now()),
            Some(ts("2017-10-22T08:41:00+11:00"))
        );
        assert_eq!(
            parse_timestamp("2017-10-22 08:41:00+10:00", &now()),
            Some(ts("2017-10-22T08:41:00+10:00"))
        );
    }

    #[test]
    fn parses_minute_precision() {
        assert_eq!(
            parse_timestamp("2017-10-22T08:41", &now()),
            Some(ts("2017-10-22T08:41:00+11:00"))
        );
        assert_eq!(
            parse_timestamp("2017-10-22 08:41", &now()),
            Some(ts("2017-10-22T08:41:00+11:00"))
        );
    }

    #[test]
    fn parses_fractional_seconds_without_offset() {
        assert_eq!(
            parse_timestamp("2017-10-22T08:41:00.000", &now()),
            Some(ts("2017-10-22T08:41:00+11:00"))
        );
        assert_eq!(
            parse_timestamp("2017-10-22T08:41:00.250", &now()),
            Some(ts("2017-10-22T08:41:00.250+11:00"))
        );
    }

    #[test]
    fn parses_date_only() {
        assert_eq!(
            parse_timestamp("2017-10-22", &now()),
            Some(ts("2017-10-22T00:00:00+11:00"))
        );
        assert_eq!(
            parse_timestamp("20171022", &now()),
            Some(ts("2017-10-22T00:00:00+11:00"))
        );
    }

    #[test]
    fn parses_basic_format() {
        assert_eq!(
            parse_timestamp("20171022T084100", &now()),
            Some(ts("2017-10-22T08:41:00+11:00"))
        );
        assert_eq!(
            parse_timestamp("20171022T084100+1000", &now()),
            Some(ts("2017-10-22T08:41:00+10:00"))
        );
    }

    #[test]
    fn calendar_week_boundaries() {
        let now = now();

        assert_eq!(
            calendar(&ts("2017-10-16T10:00:00+11:00"), &now),
            "Last Monday at 10:00 AM"
        );
        assert_eq!(
            calendar(&ts("2017-10-15T10:00:00+11:00"), &now),
            "15/10/2017 10:00:00 AM"
        );
        assert_eq!(
            calendar(&ts("2017-10-28T10:00:00+11:00"), &now),
            "Saturday at 10:00 AM"
        );
        assert_eq!(
            calendar(&ts("2017-10-29T10:00:00+11:00"), &now),
            "29/10/2017 10:00:00 AM"
        );
    }
}
