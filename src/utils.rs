use std::fmt::Display;

use chrono::{DateTime, Datelike as _, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serializer};

/// Calendar day of `time` as seen in its own offset
///
/// Every date comparison in the crate goes through this so a timestamp near midnight
/// never lands in the neighbouring day because of a UTC conversion.
pub fn day_of(time: &DateTime<FixedOffset>) -> NaiveDate {
    time.date_naive()
}

/// Number of calendar days in `[start, end]`, both inclusive
pub fn count_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Display rounding, two decimals
pub fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parses a day from either `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|time| day_of(&time)))
}

pub fn deserialize_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;

    parse_day(&raw).ok_or_else(|| serde::de::Error::custom(format!("`{raw}` is not a valid date")))
}

pub fn deserialize_optional_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None)
    };

    parse_day(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("`{raw}` is not a valid date")))
}

pub fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{FixedOffset, TimeZone as _};

    #[test]
    fn test_day_of_keeps_local_offset() {
        let colombo = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        // 00:15 local is still the previous day in UTC
        let time = colombo.with_ymd_and_hms(2025, 1, 16, 0, 15, 0).unwrap();

        assert_eq!(day_of(&time), NaiveDate::from_ymd_opt(2025, 1, 16).unwrap());
        assert_eq!(time.naive_utc().date(), NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_count_days() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();

        assert_eq!(count_days(start, end), 7);
        assert_eq!(count_days(start, start), 1);
    }

    #[test]
    fn test_first_day_of_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        assert_eq!(first_day_of_month(date), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_parse_day() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        assert_eq!(parse_day("2025-01-15"), Some(expected));
        assert_eq!(parse_day("2025-01-15T23:30:00+05:30"), Some(expected));
        assert_eq!(parse_day("2025-01-15T08:00:00.000Z"), Some(expected));
        assert_eq!(parse_day("15/01/2025"), None);
    }

    #[test]
    fn test_round_2() {
        assert_eq!(round_2(8.333333), 8.33);
        assert_eq!(round_2(40.0), 40.0);
    }
}
