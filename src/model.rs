// src/model.rs
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// One article as handed over by the feed retrieval step.
/// Missing or null fields are tolerated and read as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawArticle {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String, // free-form, e.g. RFC 2822 or ISO 8601
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String, // e.g. "BBC", "Guardian"
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl RawArticle {
    /// Title and summary joined the way both the filter and the detector read them.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

/// Output record written into a date partition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedArticle {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub date: DateTime<FixedOffset>,
    pub source: String,
    pub clubs: BTreeSet<String>,
    pub leagues: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_league: Option<String>,
}

impl EnrichedArticle {
    /// Dedup identity inside a partition.
    pub fn identity(&self) -> (&str, &str) {
        (self.title.as_str(), self.source.as_str())
    }
}

/// Result of entity detection for one article.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Detection {
    pub clubs: BTreeSet<String>,
    pub leagues: BTreeSet<String>,
}
