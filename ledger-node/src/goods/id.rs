//! Deterministic goods identifiers
//!
//! `id = issuer + month_code(maturity) + day_code(maturity)` where
//! `maturity = issue date + offset days`, computed in **UTC**.
//!
//! Every peer executing the same transaction sees the same issuer and
//! transaction timestamp, so every peer derives the same id.
//!
//! | Part | Values | Codes |
//! |------|--------|-------|
//! | month | 1–12 | `A`–`H`, `J`–`M` |
//! | day | 1–9 | `1`–`9` |
//! | day | 10–31 | `A`–`H`, `J`–`N`, `P`–`X` |
//!
//! `I` and `O` are never used, they read too much like `1` and `0`.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta};
use thiserror::Error;

/// Month 1–12 → code
const MONTH_CODES: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M'];

/// Day 1–31 → code
const DAY_CODES: [char; 31] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J',
    'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X',
];

/// Default days between issue and maturity
pub const DEFAULT_MATURITY_OFFSET_DAYS: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("not an integer count of milliseconds: {0:?}")]
    Unparseable(String),

    #[error("timestamp out of range: {0}")]
    OutOfRange(i64),

    #[error("maturity date out of range: {timestamp_ms} + {days} days")]
    MaturityOutOfRange { timestamp_ms: i64, days: i64 },
}

/// Parse a decimal string of Unix millis
pub fn parse_timestamp_millis(raw: &str) -> Result<i64, IdError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| IdError::Unparseable(raw.to_string()))
}

/// Maturity date (UTC) for an issue instant and an offset in days
pub fn maturity_date(issue_timestamp_ms: i64, maturity_offset_days: i64) -> Result<NaiveDate, IdError> {
    let issued = DateTime::from_timestamp_millis(issue_timestamp_ms)
        .ok_or(IdError::OutOfRange(issue_timestamp_ms))?;

    let out_of_range = || IdError::MaturityOutOfRange {
        timestamp_ms: issue_timestamp_ms,
        days: maturity_offset_days,
    };
    let offset = TimeDelta::try_days(maturity_offset_days).ok_or_else(out_of_range)?;
    let maturity = issued.checked_add_signed(offset).ok_or_else(out_of_range)?;

    Ok(maturity.date_naive())
}

pub fn month_code(month: u32) -> Option<char> {
    let idx = month.checked_sub(1)? as usize;
    MONTH_CODES.get(idx).copied()
}

pub fn day_code(day: u32) -> Option<char> {
    let idx = day.checked_sub(1)? as usize;
    DAY_CODES.get(idx).copied()
}

/// Two-character suffix for a maturity date
pub fn suffix_for_date(date: NaiveDate) -> String {
    // chrono guarantees month in 1..=12 and day in 1..=31
    let month = MONTH_CODES[date.month0() as usize];
    let day = DAY_CODES[date.day0() as usize];
    [month, day].iter().collect()
}

pub fn generate_suffix(issue_timestamp_ms: i64, maturity_offset_days: i64) -> Result<String, IdError> {
    let maturity = maturity_date(issue_timestamp_ms, maturity_offset_days)?;
    Ok(suffix_for_date(maturity))
}

/// Goods id for an issuer and issue instant
pub fn generate_id(
    issuer: &str,
    issue_timestamp_ms: i64,
    maturity_offset_days: i64,
) -> Result<String, IdError> {
    let suffix = generate_suffix(issue_timestamp_ms, maturity_offset_days)?;
    Ok(format!("{}{}", issuer, suffix))
}

/// [`generate_id`] for a timestamp given as text
pub fn generate_id_from_str(
    issuer: &str,
    issue_timestamp: &str,
    maturity_offset_days: i64,
) -> Result<String, IdError> {
    let ms = parse_timestamp_millis(issue_timestamp)?;
    generate_id(issuer, ms, maturity_offset_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// 2024-03-05T00:00:00Z
    const MARCH_5_2024: i64 = 1_709_596_800_000;

    #[test]
    fn test_example_id() {
        // 2024-03-05 + 15 days = 2024-03-20 → C, L
        let id = generate_id("acme", MARCH_5_2024, 15).unwrap();
        assert_eq!(id, "acmeCL");
    }

    #[test]
    fn test_deterministic() {
        let ts = MARCH_5_2024 + 12_345_678;
        let a = generate_id("acme", ts, 15).unwrap();
        let b = generate_id("acme", ts, 15).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_day_same_id() {
        let morning = generate_id("acme", MARCH_5_2024 + 1_000, 15).unwrap();
        let evening = generate_id("acme", MARCH_5_2024 + 86_399_999, 15).unwrap();
        assert_eq!(morning, evening);

        let next_day = generate_id("acme", MARCH_5_2024 + 86_400_000, 15).unwrap();
        assert_eq!(next_day, "acmeCM");
    }

    #[test]
    fn test_utc_boundary() {
        // 2024-03-19T23:59:59.999Z with no offset stays on the 19th
        let ts = MARCH_5_2024 + 15 * 86_400_000 - 1;
        assert_eq!(generate_suffix(ts, 0).unwrap(), "CK");
    }

    #[test]
    fn test_offset_crosses_month_and_year() {
        // 2023-12-20 + 15 days = 2024-01-04
        let dec_20_2023 = 1_703_030_400_000;
        assert_eq!(generate_suffix(dec_20_2023, 15).unwrap(), "A4");

        // negative offsets move backwards
        assert_eq!(generate_suffix(MARCH_5_2024, -5).unwrap(), "BV");
    }

    #[test]
    fn test_month_table() {
        let codes: String = (1..=12).filter_map(month_code).collect();
        assert_eq!(codes, "ABCDEFGHJKLM");
        assert_eq!(month_code(0), None);
        assert_eq!(month_code(13), None);
    }

    #[test]
    fn test_day_table() {
        let codes: String = (1..=31).filter_map(day_code).collect();
        assert_eq!(codes, "123456789ABCDEFGHJKLMNPQRSTUVWX");
        assert_eq!(day_code(0), None);
        assert_eq!(day_code(32), None);
    }

    #[test]
    fn test_no_confusable_letters() {
        for c in MONTH_CODES.iter().chain(DAY_CODES.iter()) {
            assert!(*c != 'I' && *c != 'O', "confusable code {}", c);
        }
    }

    #[test]
    fn test_suffixes_injective_over_calendar() {
        // 2024 is a leap year, so every valid (month, day) pair occurs
        let mut seen = HashSet::new();
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while date.year() == 2024 {
            let suffix = suffix_for_date(date);
            assert!(seen.insert(suffix.clone()), "duplicate suffix {} for {}", suffix, date);
            date = date.succ_opt().unwrap();
        }
        assert_eq!(seen.len(), 366);
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp_millis("1709596800000"), Ok(MARCH_5_2024));
        assert_eq!(
            parse_timestamp_millis("yesterday"),
            Err(IdError::Unparseable("yesterday".to_string()))
        );
        assert!(parse_timestamp_millis("1.5").is_err());
        assert!(parse_timestamp_millis("").is_err());
    }

    #[test]
    fn test_generate_id_from_str() {
        assert_eq!(generate_id_from_str("acme", "1709596800000", 15).unwrap(), "acmeCL");
        assert!(matches!(
            generate_id_from_str("acme", "not-a-number", 15),
            Err(IdError::Unparseable(_))
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(generate_suffix(i64::MAX, 0), Err(IdError::OutOfRange(i64::MAX)));
        assert!(matches!(
            generate_suffix(MARCH_5_2024, i64::MAX),
            Err(IdError::MaturityOutOfRange { .. })
        ));
    }
}
