use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
    /// `None` serializes as `null` and asks for an unbounded lifetime.
    pub lifetime: Option<i64>,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenResponse {
    /// The shortened URL.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendRequest {
    pub lifetime: Option<i64>,
}

/// Status record of a shortened URL as reported by the service.
///
/// `expires_in_days` is only meaningful while the link is neither expired nor
/// unbounded. A `None` lifetime means the link never expires, whatever the
/// other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlStatus {
    pub url: String,
    #[serde(rename = "lifetime", default)]
    pub lifetime_days: Option<i64>,
    #[serde(rename = "registered")]
    pub registered_at: String,
    #[serde(rename = "modified")]
    pub modified_at: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(rename = "expires_in", default)]
    pub expires_in_days: Option<i64>,
    pub expired: bool,
}

impl UrlStatus {
    pub fn is_unbounded(&self) -> bool {
        self.lifetime_days.is_none()
    }

    pub fn registered_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.registered_at)
    }

    pub fn modified_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.modified_at)
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at.as_deref().and_then(parse_timestamp)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
