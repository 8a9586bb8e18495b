//! Timestamp parsing and formatting.
//!
//! Detectors return timestamps as raw numbers or colon-delimited strings
//! (`SS`, `MM:SS`, `HH:MM:SS`, each field optionally fractional). Everything
//! is normalized to f64 seconds internally.

use thiserror::Error;

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("timestamp cannot be negative")]
    Negative,

    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("invalid timestamp format '{0}': use SS, MM:SS or HH:MM:SS")]
    InvalidFormat(String),
}

const FIELD_NAMES: [&str; 3] = ["hours", "minutes", "seconds"];

/// Parse a timestamp string to total seconds.
///
/// Supports `HH:MM:SS`, `MM:SS` and `SS`, each field with an optional
/// fractional part. Empty input means "start of file" and parses to zero.
///
/// # Examples
/// ```
/// use podcut_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("01:30:00").unwrap(), 5400.0);
/// assert_eq!(parse_timestamp("05:30").unwrap(), 330.0);
/// assert_eq!(parse_timestamp("90").unwrap(), 90.0);
/// assert_eq!(parse_timestamp("").unwrap(), 0.0);
/// ```
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Ok(0.0);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    if parts.len() > 3 {
        return Err(TimestampError::InvalidFormat(ts.to_string()));
    }

    // Right-align fields so "MM:SS" maps to minutes/seconds, not hours/minutes.
    let offset = 3 - parts.len();
    let mut total = 0.0;
    for (i, part) in parts.iter().enumerate() {
        let name = FIELD_NAMES[offset + i];
        let value: f64 = part
            .trim()
            .parse()
            .map_err(|_| TimestampError::InvalidValue(name, part.to_string()))?;
        if value < 0.0 {
            return Err(TimestampError::Negative);
        }
        let scale = match offset + i {
            0 => 3600.0,
            1 => 60.0,
            _ => 1.0,
        };
        total += value * scale;
    }

    Ok(total)
}

/// Parse a timestamp from a JSON value: either a raw number of seconds or a
/// string in one of the colon-delimited formats.
pub fn parse_timestamp_value(value: &serde_json::Value) -> Result<f64, TimestampError> {
    match value {
        serde_json::Value::Number(n) => {
            let secs = n
                .as_f64()
                .ok_or_else(|| TimestampError::InvalidValue("seconds", n.to_string()))?;
            if secs < 0.0 {
                return Err(TimestampError::Negative);
            }
            Ok(secs)
        }
        serde_json::Value::String(s) => parse_timestamp(s),
        serde_json::Value::Null => Ok(0.0),
        other => Err(TimestampError::InvalidFormat(other.to_string())),
    }
}

/// Format seconds as an `HH:MM:SS.mmm` string.
///
/// Left inverse of [`parse_timestamp`] to millisecond precision.
pub fn format_seconds(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    // Round to millisecond first so 59.9996 carries into the next minute
    // instead of printing as "60.000".
    let total_ms = (total_secs * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let mins = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) as f64 / 1000.0;
    format!("{:02}:{:02}:{:06.3}", hours, mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_timestamp_hh_mm_ss() {
        assert_eq!(parse_timestamp("00:00:00").unwrap(), 0.0);
        assert_eq!(parse_timestamp("00:01:30").unwrap(), 90.0);
        assert_eq!(parse_timestamp("01:30:45").unwrap(), 5445.0);
    }

    #[test]
    fn test_parse_timestamp_mm_ss() {
        assert_eq!(parse_timestamp("05:30").unwrap(), 330.0);
        assert_eq!(parse_timestamp("1:30").unwrap(), 90.0);
    }

    #[test]
    fn test_parse_timestamp_ss() {
        assert_eq!(parse_timestamp("90").unwrap(), 90.0);
        assert_eq!(parse_timestamp("90.25").unwrap(), 90.25);
    }

    #[test]
    fn test_parse_timestamp_fractional_fields() {
        let secs = parse_timestamp("00:00:30.500").unwrap();
        assert!((secs - 30.5).abs() < 0.001);
    }

    #[test]
    fn test_empty_is_start_of_file() {
        assert_eq!(parse_timestamp("").unwrap(), 0.0);
        assert_eq!(parse_timestamp("  ").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_timestamp_errors() {
        assert!(matches!(
            parse_timestamp("abc"),
            Err(TimestampError::InvalidValue(_, _))
        ));
        assert!(matches!(
            parse_timestamp("1:2:3:4"),
            Err(TimestampError::InvalidFormat(_))
        ));
        assert!(matches!(parse_timestamp("-5"), Err(TimestampError::Negative)));
    }

    #[test]
    fn test_parse_timestamp_value() {
        assert_eq!(parse_timestamp_value(&json!(90.5)).unwrap(), 90.5);
        assert_eq!(parse_timestamp_value(&json!("01:30")).unwrap(), 90.0);
        assert_eq!(parse_timestamp_value(&json!(null)).unwrap(), 0.0);
        assert!(parse_timestamp_value(&json!({"start": 1})).is_err());
        assert!(parse_timestamp_value(&json!(-1.0)).is_err());
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "00:00:00.000");
        assert_eq!(format_seconds(90.0), "00:01:30.000");
        assert_eq!(format_seconds(3661.5), "01:01:01.500");
    }

    #[test]
    fn test_format_seconds_carries_rounding() {
        assert_eq!(format_seconds(59.9996), "00:01:00.000");
    }

    #[test]
    fn test_round_trip_within_one_ms() {
        for &x in &[0.0, 0.4215, 59.999, 61.5, 3599.25, 86400.125] {
            let parsed = parse_timestamp(&format_seconds(x)).unwrap();
            assert!(
                (parsed - x).abs() < 0.001,
                "round trip drifted for {}: got {}",
                x,
                parsed
            );
        }
    }
}
