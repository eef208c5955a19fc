//! Timestamp formatting for line headers
//!
//! The line sink can prefix each line with the time it was written. The
//! default mirrors the classic `2006/01/02 15:04:05` console logger header.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for line headers
///
/// # Examples
///
/// ```
/// use rust_log_facade::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Std.format(&at), "2025/01/08 10:30:45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Date and time to the second: `2025/01/08 10:30:45`
    #[default]
    Std,

    /// Date and time with microseconds: `2025/01/08 10:30:45.123456`
    StdMicros,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a UTC instant
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Std => datetime.format("%Y/%m/%d %H:%M:%S").to_string(),
            TimestampFormat::StdMicros => datetime.format("%Y/%m/%d %H:%M:%S%.6f").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format the current time, in UTC or the local zone
    #[must_use]
    pub fn format_now(&self, utc: bool) -> String {
        if utc {
            return self.format(&Utc::now());
        }
        let local = Local::now();
        match self {
            TimestampFormat::Std => local.format("%Y/%m/%d %H:%M:%S").to_string(),
            TimestampFormat::StdMicros => local.format("%Y/%m/%d %H:%M:%S%.6f").to_string(),
            TimestampFormat::Iso8601 => local.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Rfc3339 => local.to_rfc3339(),
            TimestampFormat::UnixMillis => local.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => local.format(format_str).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_std_format() {
        assert_eq!(TimestampFormat::Std.format(&fixed_datetime()), "2025/01/08 10:30:45");
    }

    #[test]
    fn test_std_micros_format() {
        assert_eq!(
            TimestampFormat::StdMicros.format(&fixed_datetime()),
            "2025/01/08 10:30:45.123456"
        );
    }

    #[test]
    fn test_iso8601_format() {
        assert_eq!(
            TimestampFormat::Iso8601.format(&fixed_datetime()),
            "2025-01-08T10:30:45.123Z"
        );
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y-%m-%d".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025-01-08");
    }

    #[test]
    fn test_unix_millis_format() {
        let parsed: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix millis timestamp");
        assert_eq!(parsed % 1000, 123);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TimestampFormat::Std).unwrap();
        assert_eq!(json, "\"Std\"");
        let parsed: TimestampFormat = serde_json::from_str("{\"Custom\":\"%H\"}").unwrap();
        assert_eq!(parsed, TimestampFormat::Custom("%H".to_string()));
    }
}
