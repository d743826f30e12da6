//! Talk metadata parsed from the YAML frontmatter block.
//!
//! Recognized keys:
//!
//! ```yaml
//! title: Paradise Lost         # required
//! subtitle: Heaven and Hell    # optional
//! event: Some Conference       # required
//! location: Berlin             # required
//! published_at: 2016-05-01T12:00:00Z   # required
//! ```
//!
//! Every field is optional at the parsing level. Presence is enforced by the
//! compiler afterwards, so that a missing field produces an error naming the
//! field and the talk file instead of a generic YAML message. Unrecognized
//! keys are ignored.
//!
//! ## Timestamps
//!
//! `published_at` accepts, in order of preference:
//!
//! - RFC 3339: `2016-05-01T12:00:00Z`, `2016-05-01T14:00:00+02:00`
//! - Date and time, taken as UTC: `2016-05-01 12:00:00`
//! - Bare date, midnight UTC: `2016-05-01`

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Structured fields read from a talk's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TalkMetadata {
    pub event: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Parse a frontmatter block into [`TalkMetadata`].
///
/// An empty (or whitespace-only) block yields a record with every field absent.
pub fn parse_metadata(block: &str) -> Result<TalkMetadata, serde_yaml::Error> {
    if block.trim().is_empty() {
        return Ok(TalkMetadata::default());
    }
    serde_yaml::from_str(block)
}

/// Parse a `published_at` value in any of the accepted formats.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(value) => parse_timestamp(&value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid published_at timestamp: {value:?}"))
        }),
    }
}
