//! Predicted ISS passes: turning the predictor payload into a chat report.

use serde::{de, Deserialize, Deserializer};

pub mod format;
pub mod normalizer;

pub use format::{format_report, SATELLITE_MARKER};
pub use normalizer::{normalize, parse_report};

/// One visible pass. Timestamps are wall-clock `YYYYMMDDHHmmss` in `timezone`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PassEvent {
    #[serde(deserialize_with = "timestamp")]
    pub begin: String,
    #[serde(deserialize_with = "timestamp")]
    pub end: String,
    #[serde(default)]
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub location_name: String,
    pub timezone: String,
    pub events: Vec<PassEvent>,
}

impl PassReport {
    pub fn new(location_name: String, events: Vec<PassEvent>) -> Self {
        let timezone = events
            .first()
            .map(|event| event.timezone.clone())
            .unwrap_or_default();
        PassReport {
            location_name,
            timezone,
            events,
        }
    }
}

// The predictor sometimes sends timestamps as bare numbers.
fn timestamp<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    match Raw::deserialize(deserializer) {
        Ok(Raw::Text(text)) => Ok(text),
        Ok(Raw::Number(number)) => Ok(number.to_string()),
        Err(_) => Err(de::Error::custom("timestamp must be a string or an integer")),
    }
}
