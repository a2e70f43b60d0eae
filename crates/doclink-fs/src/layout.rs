//! Source media layout
//!
//! The document store keeps every document under the media root as
//! `archive/<id>.pdf` and/or `originals/<id>.pdf`, with the id zero-padded
//! to seven digits.

use std::path::{Path, PathBuf};

use crate::constants::{SourceDir, source_file_name};

/// A source file that exists on disk for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Which source directory the file was found in
    pub dir: SourceDir,
    /// Full path of the file
    pub path: PathBuf,
}

/// The source media root and its lookup rules.
#[derive(Debug, Clone)]
pub struct SourceLayout {
    root: PathBuf,
}

impl SourceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the media root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path where a document would live inside `dir`, whether or not it exists.
    pub fn candidate(&self, dir: SourceDir, id: u64) -> PathBuf {
        self.root.join(dir).join(source_file_name(id))
    }

    /// All candidate paths for a document, in preference order.
    pub fn candidates(&self, id: u64) -> Vec<PathBuf> {
        SourceDir::PREFERENCE
            .iter()
            .map(|dir| self.candidate(*dir, id))
            .collect()
    }

    /// Resolve the file to mirror for a document.
    ///
    /// Prefers the archived rendition and falls back to the original.
    /// Returns `None` when neither exists.
    pub fn resolve(&self, id: u64) -> Option<SourceFile> {
        SourceDir::PREFERENCE.iter().find_map(|dir| {
            let path = self.candidate(*dir, id);
            path.is_file().then_some(SourceFile { dir: *dir, path })
        })
    }
}
