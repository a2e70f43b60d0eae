//! Record shapes returned by the collection endpoints
//!
//! Only the fields placement needs are required; the rest are optional and
//! unknown fields are ignored, so newer server versions keep decoding.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// A correspondent (sender or recipient of documents).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Correspondent {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub document_count: Option<u64>,
}

/// A document type such as "Invoice" or "Letter".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentType {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub document_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub is_inbox_tag: Option<bool>,
    #[serde(default)]
    pub document_count: Option<u64>,
}

/// A stored document.
///
/// `correspondent`, `document_type` and `tags` reference the support
/// collections by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Document {
    pub id: u64,
    #[serde(default)]
    pub correspondent: Option<u64>,
    #[serde(default)]
    pub document_type: Option<u64>,
    #[serde(default)]
    pub storage_path: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<u64>,
    #[serde(deserialize_with = "deserialize_created")]
    pub created: NaiveDate,
    #[serde(default)]
    pub created_date: Option<NaiveDate>,
    #[serde(default)]
    pub archive_serial_number: Option<u64>,
    #[serde(default)]
    pub original_file_name: Option<String>,
    #[serde(default)]
    pub archived_file_name: Option<String>,
}

impl Document {
    /// Calendar date the document was created on.
    ///
    /// Uses `created_date` when the server sends it, else the date of
    /// `created`.
    pub fn created_on(&self) -> NaiveDate {
        self.created_date.unwrap_or(self.created)
    }
}

/// Parse a creation stamp that is either `YYYY-MM-DD` or an RFC 3339
/// timestamp. Timestamps keep their own offset's calendar date.
pub fn parse_created(raw: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|stamp| stamp.date_naive())
        .map_err(|e| format!("invalid creation date {raw:?}: {e}"))
}

fn deserialize_created<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created(&raw).map_err(serde::de::Error::custom)
}
