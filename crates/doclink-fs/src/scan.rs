//! Destination tree scans

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::constants::PDF_EXTENSION;
use crate::{Error, Result};

/// Collect every `*.pdf` entry below `root` that is not a directory.
///
/// A missing root yields an empty set.
pub fn scan_pdf_files(root: &Path) -> Result<BTreeSet<PathBuf>> {
    let mut files = BTreeSet::new();
    if !root.is_dir() {
        return Ok(files);
    }

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == PDF_EXTENSION) {
            files.insert(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), count = files.len(), "Scanned destination tree");
    Ok(files)
}

/// List every directory below `root`, children before their parents.
///
/// The root itself is never included. Siblings are visited in file-name order.
pub fn directories_deepest_first(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    if !root.is_dir() {
        return Ok(dirs);
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// List the immediate entries of a directory.
pub fn list_dir(path: &Path) -> Result<Vec<PathBuf>> {
    fs::read_dir(path)
        .map_err(|e| Error::io(path, e))?
        .map(|entry| entry.map(|e| e.path()).map_err(|e| Error::io(path, e)))
        .collect()
}
