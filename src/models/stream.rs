//! Scheduled stream model.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::EntityId;

/// Canonical serialized form of a stream date (local wall time, no offset).
pub const STREAM_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats accepted from date inputs and from older stored records.
const ACCEPTED_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// A scheduled stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: EntityId,
    pub title: String,
    #[serde(with = "stream_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub completed: bool,
}

/// Request body for scheduling a stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStreamRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
}

/// Parse a stream date as entered in a form or found in storage.
///
/// Date-only values mean midnight. RFC 3339 values are converted to local wall time.
pub fn parse_stream_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }

    ACCEPTED_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
}

mod stream_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(STREAM_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_stream_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid stream date: {}", raw)))
    }
}
