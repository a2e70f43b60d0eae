//! Per-run working sets of the link synchronizer

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::Result;

/// Existing destination files (scanned once, before any mutation) and the
/// destination paths claimed by documents during this run.
///
/// Created fresh per run and never persisted.
#[derive(Debug, Clone, Default)]
pub struct LinkState {
    existing: BTreeSet<PathBuf>,
    linked: BTreeMap<PathBuf, u64>,
}

impl LinkState {
    /// Scan `root` for every `*.pdf` file.
    pub fn scan(root: &Path) -> Result<Self> {
        Ok(Self::with_existing(doclink_fs::scan_pdf_files(root)?))
    }

    pub fn with_existing(existing: BTreeSet<PathBuf>) -> Self {
        Self {
            existing,
            linked: BTreeMap::new(),
        }
    }

    pub fn existing(&self) -> &BTreeSet<PathBuf> {
        &self.existing
    }

    /// The document that claimed `path` earlier in this run, if any.
    pub fn claimed_by(&self, path: &Path) -> Option<u64> {
        self.linked.get(path).copied()
    }

    /// Record `path` as live for `document`. The first claim wins.
    pub fn claim(&mut self, path: PathBuf, document: u64) {
        self.linked.entry(path).or_insert(document);
    }

    /// Every directory between `root` (exclusive) and a claimed path.
    pub fn live_dirs(&self, root: &Path) -> BTreeSet<PathBuf> {
        let mut dirs = BTreeSet::new();
        for path in self.linked.keys() {
            for ancestor in path.ancestors().skip(1) {
                if ancestor == root || !ancestor.starts_with(root) {
                    break;
                }
                if !dirs.insert(ancestor.to_path_buf()) {
                    break;
                }
            }
        }
        dirs
    }

    /// Existing files no document claimed, in path order.
    pub fn stale(&self) -> Vec<PathBuf> {
        self.existing
            .iter()
            .filter(|path| !self.linked.contains_key(*path))
            .cloned()
            .collect()
    }
}
