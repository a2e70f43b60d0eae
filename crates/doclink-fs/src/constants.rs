//! Constants for the source media layout.

use std::path::Path;

/// Extension of every mirrored document file.
pub const PDF_EXTENSION: &str = "pdf";

/// Width of the zero-padded document id in source file names.
pub const ID_WIDTH: usize = 7;

/// Subdirectories of the source media root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDir {
    /// The `archive` directory (OCR'd PDF/A renditions)
    Archive,
    /// The `originals` directory (files as uploaded)
    Originals,
}

impl SourceDir {
    /// Lookup order: archived renditions win over originals.
    pub const PREFERENCE: [SourceDir; 2] = [SourceDir::Archive, SourceDir::Originals];

    /// Get the string representation of the directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Originals => "originals",
        }
    }
}

impl AsRef<Path> for SourceDir {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for SourceDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// File name of a document inside a source directory, e.g. `0000042.pdf`.
pub fn source_file_name(id: u64) -> String {
    format!("{:0width$}.{}", id, PDF_EXTENSION, width = ID_WIDTH)
}
