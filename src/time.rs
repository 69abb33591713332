//! Time helpers at the wire boundary.
//!
//! Outgoing query bodies carry hour-offset timestamps such as
//! `2024-01-02T03:04:05+08`; stored documents carry millisecond UTC
//! timestamps such as `2024-01-02T03:04:05.000Z`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::errors::ClientError;

/// Format of timestamps sent to the backend in query bodies. The offset is
/// rendered hours-only.
const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:::z";

/// Format of timestamps the backend stores on documents.
const DOCUMENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Format a timestamp for an outgoing query body, e.g. `2024-01-02T03:04:05+08`.
pub fn format_es_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(QUERY_TIME_FORMAT).to_string()
}

/// Parse a document timestamp of the form `2024-01-02T03:04:05.000Z`.
///
/// # Returns
///
/// * `Ok(DateTime<Utc>)` - The parsed instant
/// * `Err(ClientError::DecodeError)` - If the string does not match the
///   document format; the error carries the offending string
pub fn parse_es_time(value: &str) -> Result<DateTime<Utc>, ClientError> {
    NaiveDateTime::parse_from_str(value, DOCUMENT_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| ClientError::decode(e.to_string(), value))
}

/// Parse a document timestamp, substituting the current time when the string
/// does not parse.
///
/// Prefer [`parse_es_time`] where a bad timestamp should be an error; this
/// variant keeps the silent fallback some ingestion paths depend on.
pub fn parse_es_time_or_now(value: &str) -> DateTime<Utc> {
    parse_es_time(value).unwrap_or_else(|_| Utc::now())
}
