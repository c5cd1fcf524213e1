//! Column encodings shared by the repositories.

use std::str::FromStr;

use chrono::SecondsFormat;
use farmwatch_domain::time::Timestamp;

/// Fixed-width RFC 3339, so text order matches time order.
pub(crate) fn encode_time(at: Timestamp) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_time(raw: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|at| at.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Parse a text column with the type's `FromStr`.
pub(crate) fn decode<T>(raw: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse().map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// `LIMIT` binds are `i64` in `SQLite`.
pub(crate) fn limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
