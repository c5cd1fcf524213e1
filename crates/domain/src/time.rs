//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::error::ValidationError;

/// UTC timestamp of a reading or an action record.
pub type Timestamp = DateTime<Utc>;

/// A UTC calendar day.
pub type Day = NaiveDate;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse a `YYYY-MM-DD` calendar day.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] for anything else.
pub fn parse_day(raw: &str) -> Result<Day, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Start of `day` and start of the following day.
#[must_use]
pub fn day_bounds(day: Day) -> (Timestamp, Timestamp) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    (start, start + TimeDelta::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_span_one_utc_day() {
        let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(start.to_rfc3339(), "2024-02-29T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn should_parse_iso_day_only() {
        assert_eq!(
            parse_day("2024-05-02").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
        );
        assert!(matches!(
            parse_day("02/05/2024"),
            Err(ValidationError::InvalidDate(raw)) if raw == "02/05/2024"
        ));
        assert!(parse_day("2024-02-30").is_err());
    }
}
