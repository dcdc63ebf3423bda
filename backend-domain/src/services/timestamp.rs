// Timestamp parsing for persisted log rows

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use thiserror::Error;

/// Persisted timestamp shape, seconds included.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Older rows omit the seconds.
pub const TIMESTAMP_FORMAT_SHORT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp '{0}' matches neither accepted format")]
    Malformed(String),
}

/// Parses a stored timestamp into an instant in the target timezone.
///
/// Stored values are naive and are taken to already be expressed in the
/// target zone, so they are localized in place, never converted. No shapes
/// beyond the two formats are accepted.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Result<DateTime<Tz>, TimestampError> {
    let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT_SHORT))
        .map_err(|_| TimestampError::Malformed(raw.to_string()))?;
    naive
        .and_local_timezone(tz)
        .single()
        .ok_or_else(|| TimestampError::Malformed(raw.to_string()))
}

/// Calendar date of a stored timestamp in the target timezone. Date-level
/// comparison is all the window classifier ever needs.
pub fn parse_record_date(raw: &str, tz: Tz) -> Result<NaiveDate, TimestampError> {
    parse_timestamp(raw, tz).map(|instant| instant.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::Asia::Kolkata;

    #[test]
    fn parses_with_seconds() {
        let instant = parse_timestamp("2024-01-01 08:15:30", Kolkata).expect("parse");
        assert_eq!(instant.hour(), 8);
        assert_eq!(instant.second(), 30);
        assert_eq!(instant.date_naive().to_string(), "2024-01-01");
    }

    #[test]
    fn parses_without_seconds() {
        let instant = parse_timestamp("2024-01-01 08:15", Kolkata).expect("parse");
        assert_eq!(instant.minute(), 15);
        assert_eq!(instant.second(), 0);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_timestamp("not-a-date", Kolkata).is_err());
        assert!(parse_timestamp("2024-01-01T08:15:30", Kolkata).is_err());
        assert!(parse_timestamp("2024-01-01", Kolkata).is_err());
        assert!(parse_timestamp("2024-01-01 08:15:30 extra", Kolkata).is_err());
        assert!(parse_timestamp("", Kolkata).is_err());
    }

    #[test]
    fn localizes_instead_of_converting() {
        // 00:30 IST stays on the same calendar day; a UTC conversion would
        // have pushed it to the previous one.
        let date = parse_record_date("2024-01-02 00:30:00", Kolkata).expect("parse");
        assert_eq!(date.to_string(), "2024-01-02");
    }

    #[test]
    fn error_carries_the_offending_value() {
        let err = parse_timestamp("garbage", Kolkata).expect_err("must fail");
        assert_eq!(err, TimestampError::Malformed("garbage".to_string()));
    }
}
