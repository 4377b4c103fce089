// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a date as `MMDDYY`, the format used for birth and join dates.
pub fn format_mmddyy(date: NaiveDate) -> String {
    date.format("%m%d%y").to_string()
}

/// Parse an `MMDDYY` date.
///
/// Two-digit years up to the current short year are read as 20xx, later ones
/// as 19xx (so "010105" is 2005 and "010195" is 1995 when today is in 2025).
pub fn parse_mmddyy(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month: u32 = raw[0..2].parse().ok()?;
    let day: u32 = raw[2..4].parse().ok()?;
    let short_year: i32 = raw[4..6].parse().ok()?;

    let year = if short_year <= today.year() % 100 {
        2000 + short_year
    } else {
        1900 + short_year
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let ts = date(2025, 3, 4).and_hms_opt(5, 6, 7).unwrap().and_utc();
        assert_eq!(format_utc_rfc3339(ts), "2025-03-04T05:06:07Z");
    }

    #[test]
    fn test_parse_mmddyy_century_pivot() {
        let today = date(2025, 6, 1);
        assert_eq!(parse_mmddyy("010105", today), Some(date(2005, 1, 1)));
        assert_eq!(parse_mmddyy("123125", today), Some(date(2025, 12, 31)));
        assert_eq!(parse_mmddyy("010126", today), Some(date(1926, 1, 1)));
        assert_eq!(parse_mmddyy("071599", today), Some(date(1999, 7, 15)));
    }

    #[test]
    fn test_parse_mmddyy_rejects_garbage() {
        let today = date(2025, 6, 1);
        assert_eq!(parse_mmddyy("", today), None);
        assert_eq!(parse_mmddyy("1234567", today), None);
        assert_eq!(parse_mmddyy("13aa99", today), None);
        assert_eq!(parse_mmddyy("023099", today), None);
        assert_eq!(parse_mmddyy("130199", today), None);
    }

    #[test]
    fn test_format_mmddyy() {
        assert_eq!(format_mmddyy(date(2024, 2, 9)), "020924");
    }
}
