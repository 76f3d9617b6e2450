//! Reminder time phrases
//!
//! Accepts clock times as they come out of a transcript: "6:30 pm",
//! "6 pm", "6:30pm", "18:30". A bare hour without am/pm is rejected.

use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveTime, TimeZone};
use regex::Regex;

use crate::error::InvalidTime;

static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*(am|pm)?$").expect("valid regex")
});

/// Parse a spoken clock time
#[must_use]
pub fn parse_clock_time(phrase: &str) -> Option<NaiveTime> {
    let compact = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    let caps = CLOCK_TIME.captures(&compact)?;

    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let hour = match caps.get(3).map(|m| m.as_str()) {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match (meridiem, hour) {
                ("am", 12) => 0,
                ("am", h) => h,
                ("pm", 12) => 12,
                (_, h) => h + 12,
            }
        }
        // 24-hour form needs explicit minutes
        None if caps.get(2).is_some() => hour,
        None => return None,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Combine a clock time with today's date
///
/// # Errors
///
/// Returns [`InvalidTime::Passed`] if the moment is already behind `now`,
/// or [`InvalidTime::Unparseable`] if the local time does not exist today
/// (DST gap)
pub fn resolve_today(
    now: DateTime<Local>,
    time: NaiveTime,
) -> Result<DateTime<Local>, InvalidTime> {
    let naive = now.date_naive().and_time(time);
    let fire_at = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| InvalidTime::Unparseable(time.to_string()))?;

    if fire_at < now {
        return Err(InvalidTime::Passed);
    }

    Ok(fire_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_meridiem_forms() {
        assert_eq!(parse_clock_time("6:30 pm"), Some(t(18, 30)));
        assert_eq!(parse_clock_time("6:30pm"), Some(t(18, 30)));
        assert_eq!(parse_clock_time("6 pm"), Some(t(18, 0)));
        assert_eq!(parse_clock_time("12 am"), Some(t(0, 0)));
        assert_eq!(parse_clock_time("12:15 pm"), Some(t(12, 15)));
        assert_eq!(parse_clock_time("9:05 am"), Some(t(9, 5)));
    }

    #[test]
    fn test_twenty_four_hour_form() {
        assert_eq!(parse_clock_time("18:30"), Some(t(18, 30)));
        assert_eq!(parse_clock_time("  7:45  "), Some(t(7, 45)));
    }

    #[test]
    fn test_rejects_nonsense() {
        assert_eq!(parse_clock_time("6"), None);
        assert_eq!(parse_clock_time("25:00"), None);
        assert_eq!(parse_clock_time("13 pm"), None);
        assert_eq!(parse_clock_time("6:75 am"), None);
        assert_eq!(parse_clock_time("ma"), None);
        assert_eq!(parse_clock_time(""), None);
    }

    #[test]
    fn test_resolve_today() {
        let now = Local.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).single().unwrap();

        let later = resolve_today(now, t(10, 5)).unwrap();
        assert_eq!(later - now, chrono::Duration::minutes(5));

        assert_eq!(resolve_today(now, t(9, 59)), Err(InvalidTime::Passed));
        assert!(resolve_today(now, t(10, 0)).is_ok());
    }
}
