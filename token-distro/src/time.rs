//! Instants are epoch milliseconds (`Timestamp`), the unit the subgraph and
//! the browser clock both speak.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::DistroError;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

pub const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Current wall-clock time. Never called by the calculator itself; callers
/// read it once and pass it to every query.
pub fn now_unix_ms() -> Timestamp {
    Utc::now().timestamp_millis()
}

/// Parse an RFC 3339 / ISO-8601 instant or an all-digit epoch-ms string.
///
/// Offset-less date-times and bare dates are read as UTC.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, DistroError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DistroError::InvalidTimestamp);
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().map_err(|_| DistroError::InvalidTimestamp);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
        .ok_or(DistroError::InvalidTimestamp)
}

/// Raw instant as it arrives in a schedule payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeInput {
    Millis(i64),
    Text(String),
    Instant(DateTime<Utc>),
}

impl<'de> Deserialize<'de> for TimeInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().map(TimeInput::Millis).ok_or_else(|| {
                de::Error::custom(format_args!("{n} is not an epoch millisecond count"))
            }),
            Value::String(s) => Ok(TimeInput::Text(s)),
            other => Err(de::Error::custom(format_args!(
                "expected a timestamp, found {other}"
            ))),
        }
    }
}

impl TimeInput {
    pub fn into_timestamp(self) -> Result<Timestamp, DistroError> {
        match self {
            TimeInput::Millis(ms) => Ok(ms),
            TimeInput::Text(s) => parse_timestamp(&s),
            TimeInput::Instant(dt) => Ok(dt.timestamp_millis()),
        }
    }
}

impl From<i64> for TimeInput {
    fn from(value: i64) -> Self {
        TimeInput::Millis(value)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        TimeInput::Text(value.to_owned())
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(value: DateTime<Utc>) -> Self {
        TimeInput::Instant(value)
    }
}

/// Countdown text such as `"2d 3h 15min"`.
///
/// Starts at the largest non-zero unit and renders at most `parts` units;
/// negative durations render as zero seconds.
pub fn duration_to_string(ms: i64, parts: usize) -> String {
    let ms = ms.max(0);
    let units = [
        (ms / MS_PER_DAY, "d"),
        ((ms % MS_PER_DAY) / MS_PER_HOUR, "h"),
        ((ms % MS_PER_HOUR) / MS_PER_MINUTE, "min"),
        ((ms % MS_PER_MINUTE) / MS_PER_SECOND, "sec"),
    ];

    let rendered: Vec<String> = units
        .iter()
        .skip_while(|(value, _)| *value == 0)
        .take(parts.max(1))
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    if rendered.is_empty() {
        "0sec".to_owned()
    } else {
        rendered.join(" ")
    }
}
