#![cfg(test)]
//! Tests for timestamp parsing and countdown formatting.

use chrono::{TimeZone, Utc};

use crate::errors::DistroError;
use crate::time::{duration_to_string, now_unix_ms, parse_timestamp, TimeInput};

const JAN_1_2022_MS: i64 = 1_640_995_200_000;

#[test]
fn test_parse_rfc3339() {
    assert_eq!(parse_timestamp("2022-01-01T00:00:00Z").unwrap(), JAN_1_2022_MS);
    assert_eq!(parse_timestamp("2022-01-01T00:00:00.250Z").unwrap(), JAN_1_2022_MS + 250);
    assert_eq!(parse_timestamp("2022-01-01T02:00:00+02:00").unwrap(), JAN_1_2022_MS);
}

#[test]
fn test_parse_naive_forms_as_utc() {
    assert_eq!(parse_timestamp("2022-01-01T00:00:00").unwrap(), JAN_1_2022_MS);
    assert_eq!(parse_timestamp("2022-01-01 00:00:01").unwrap(), JAN_1_2022_MS + 1_000);
    assert_eq!(parse_timestamp("2022-01-01").unwrap(), JAN_1_2022_MS);
}

#[test]
fn test_parse_epoch_millis_string() {
    assert_eq!(parse_timestamp("1640995200000").unwrap(), JAN_1_2022_MS);
    assert_eq!(parse_timestamp("0").unwrap(), 0);
}

#[test]
fn test_parse_rejects_garbage() {
    for input in ["", "soon", "2022-13-01", "-5", "99999999999999999999999"] {
        assert_eq!(parse_timestamp(input), Err(DistroError::InvalidTimestamp), "{input:?}");
    }
}

#[test]
fn test_time_input_variants() {
    assert_eq!(TimeInput::from(42i64).into_timestamp().unwrap(), 42);
    assert_eq!(
        TimeInput::from("2022-01-01T00:00:00Z").into_timestamp().unwrap(),
        JAN_1_2022_MS
    );
    let instant = Utc.timestamp_millis_opt(JAN_1_2022_MS).unwrap();
    assert_eq!(TimeInput::from(instant).into_timestamp().unwrap(), JAN_1_2022_MS);

    let parsed: Vec<TimeInput> = serde_json::from_str(r#"[1000, "2022-01-01"]"#).unwrap();
    assert_eq!(parsed, vec![TimeInput::Millis(1_000), TimeInput::Text("2022-01-01".to_owned())]);
}

#[test]
fn test_time_input_rejects_non_integer_numbers() {
    assert!(serde_json::from_str::<TimeInput>("1000.5").is_err());
    assert!(serde_json::from_str::<TimeInput>("100000000000000000000").is_err());
    assert!(serde_json::from_str::<TimeInput>("null").is_err());
    assert_eq!(serde_json::from_str::<TimeInput>("-5").unwrap(), TimeInput::Millis(-5));
}

#[test]
fn test_duration_to_string() {
    assert_eq!(duration_to_string(90_061_000, 3), "1d 1h 1min");
    assert_eq!(duration_to_string(90_061_000, 4), "1d 1h 1min 1sec");
    assert_eq!(duration_to_string(3_725_000, 2), "1h 2min");
    assert_eq!(duration_to_string(59_999, 3), "59sec");
    assert_eq!(duration_to_string(86_400_000, 2), "1d 0h");
    assert_eq!(duration_to_string(0, 3), "0sec");
    assert_eq!(duration_to_string(-5_000, 3), "0sec");
    // At least one unit is always shown.
    assert_eq!(duration_to_string(3_725_000, 0), "1h");
}

#[test]
fn test_now_is_after_2022() {
    assert!(now_unix_ms() > JAN_1_2022_MS);
}
