//! Server timestamps.
//!
//! The backend emits ISO-8601 strings that may or may not carry an offset.
//! [`Timestamp`] keeps the wire text untouched and parses on demand, so an
//! unexpected format never fails deserialization of the surrounding entity.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Parse as UTC. Offset-less values are taken to be UTC.
    #[must_use]
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// `YYYY-MM-DD HH:MM` for table output, or the raw text if unparseable.
    #[must_use]
    pub fn display_short(&self) -> String {
        self.parsed()
            .map_or_else(|| self.0.clone(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
