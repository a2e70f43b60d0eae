//! Error types for doclink-core

use std::fmt;

use serde::Serialize;

/// Result type for doclink-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which support collection a document reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    Correspondent,
    DocumentType,
    Tag,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Correspondent => "correspondent",
            Self::DocumentType => "document type",
            Self::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in doclink-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document references a record missing from the fetched collections.
    ///
    /// The support collections are fetched unfiltered, so this means they
    /// were not fetched completely.
    #[error("Document {document} references unknown {kind} {id}")]
    ReferentialIntegrity {
        document: u64,
        kind: ReferenceKind,
        id: u64,
    },

    /// The folder tag list could not be parsed
    #[error("Invalid folder tag list {input:?}: {message}")]
    InvalidFolderTags { input: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from doclink-fs
    #[error(transparent)]
    Fs(#[from] doclink_fs::Error),

    /// Remote API error from doclink-api
    #[error(transparent)]
    Api(#[from] doclink_api::Error),
}
