//! Destination path derivation
//!
//! [`destination_path`] is a pure function of the hydrated document and the
//! folder-tag set. Stale detection compares its output across runs, so it
//! must never depend on anything else (clock, filesystem, iteration order of
//! unordered collections).

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Error, HydratedDocument};

/// Placeholder for a missing correspondent or document type.
pub const UNKNOWN: &str = "Unknown";

/// Separator between tag names in the folder-tag layer.
pub const TAG_LAYER_SEPARATOR: &str = "-";

/// Tag ids whose names form the optional top directory layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderTags(BTreeSet<u64>);

impl FolderTags {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn contains(&self, id: u64) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }
}

impl FromStr for FolderTags {
    type Err = Error;

    /// Parse a comma-separated id list such as `"3, 7,12"`.
    ///
    /// A blank string is the empty set.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }

        input
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<u64>().map_err(|e| Error::InvalidFolderTags {
                    input: input.to_string(),
                    message: format!("{part:?}: {e}"),
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }
}

/// Names of the document's folder tags, in document tag order, joined by `-`.
///
/// `None` when no tag of the document is a folder tag.
pub fn tag_layer(doc: &HydratedDocument, folder_tags: &FolderTags) -> Option<String> {
    let names: Vec<&str> = doc
        .tags
        .iter()
        .filter(|tag| folder_tags.contains(tag.id))
        .map(|tag| tag.name.as_str())
        .collect();

    (!names.is_empty()).then(|| names.join(TAG_LAYER_SEPARATOR))
}

/// `"{YYYY-MM-DD} {correspondent} {title}.pdf"`
pub fn file_name(doc: &HydratedDocument) -> String {
    format!(
        "{} {} {}.pdf",
        doc.created_on().format("%Y-%m-%d"),
        doc.correspondent.as_deref().unwrap_or(UNKNOWN),
        doc.title()
    )
}

/// Destination path of a document, relative to the destination root:
/// `[tag layer/]<document type>/<YYYY-MM>/<file name>`.
pub fn destination_path(doc: &HydratedDocument, folder_tags: &FolderTags) -> PathBuf {
    let mut path = PathBuf::new();
    if let Some(layer) = tag_layer(doc, folder_tags) {
        path.push(sanitize_component(&layer).as_ref());
    }
    path.push(sanitize_component(doc.document_type.as_deref().unwrap_or(UNKNOWN)).as_ref());
    path.push(doc.created_on().format("%Y-%m").to_string());
    path.push(sanitize_component(&file_name(doc)).as_ref());
    path
}

/// Make a remote name safe to use as exactly one path component.
///
/// Path separators and NUL become `_`; a name that would still be empty,
/// `.` or `..` is replaced by underscores. Everything else is kept verbatim.
pub fn sanitize_component(name: &str) -> Cow<'_, str> {
    let is_reserved = |c: char| matches!(c, '/' | '\\' | '\0');

    let cleaned: Cow<'_, str> = if name.contains(is_reserved) {
        Cow::Owned(name.replace(is_reserved, "_"))
    } else {
        Cow::Borrowed(name)
    };

    match cleaned.as_ref() {
        "" => Cow::Borrowed("_"),
        "." | ".." => Cow::Owned("_".repeat(cleaned.len())),
        _ => cleaned,
    }
}
