//! [`MirrorFixture`] builder for link-synchronization scenarios.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Observable state of a directory tree: every directory and every file
/// with its bytes, keyed by path relative to the tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSnapshot {
    pub dirs: BTreeSet<PathBuf>,
    pub files: BTreeMap<PathBuf, Vec<u8>>,
}

/// A temporary media root (`src/archive`, `src/originals`) and an empty
/// destination root (`dst`).
///
/// # Example
///
/// ```rust,no_run
/// use doclink_test_utils::tree::MirrorFixture;
///
/// let fixture = MirrorFixture::new();
/// fixture.add_archive(1, b"%PDF-1.7");
/// fixture.add_dst_file("Invoice/2024-03/old.pdf", b"stale");
/// ```
pub struct MirrorFixture {
    temp_dir: TempDir,
}

impl Default for MirrorFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorFixture {
    /// Create the media root with empty `archive/` and `originals/`, and an
    /// empty destination root.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        for dir in ["src/archive", "src/originals", "dst"] {
            fs::create_dir_all(temp_dir.path().join(dir)).unwrap();
        }
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The media root.
    pub fn src(&self) -> PathBuf {
        self.root().join("src")
    }

    /// The destination root.
    pub fn dst(&self) -> PathBuf {
        self.root().join("dst")
    }

    /// Write `archive/<id>.pdf` and return its path.
    pub fn add_archive(&self, id: u64, content: &[u8]) -> PathBuf {
        self.add_source("archive", id, content)
    }

    /// Write `originals/<id>.pdf` and return its path.
    pub fn add_original(&self, id: u64, content: &[u8]) -> PathBuf {
        self.add_source("originals", id, content)
    }

    /// Write a file below the destination root, creating parents.
    pub fn add_dst_file(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.dst().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Create an (empty) directory below the destination root.
    pub fn add_dst_dir(&self, rel: &str) -> PathBuf {
        let path = self.dst().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Capture every directory and file below the destination root.
    pub fn snapshot_dst(&self) -> TreeSnapshot {
        snapshot(&self.dst())
    }

    /// Assert that `rel` (below the destination root) is a hard link to `source`.
    ///
    /// # Panics
    /// Panics if the destination is missing or is a different file.
    pub fn assert_linked(&self, rel: &str, source: &Path) {
        let dst = self.dst().join(rel);
        assert!(dst.is_file(), "Expected linked file to exist: {}", dst.display());
        assert!(
            same_inode(&dst, source),
            "Expected {} to be a hard link to {}",
            dst.display(),
            source.display()
        );
    }

    /// Assert that `rel` (below the destination root) does **not** exist.
    pub fn assert_dst_missing(&self, rel: &str) {
        let path = self.dst().join(rel);
        assert!(!path.exists(), "Expected path NOT to exist: {}", path.display());
    }

    /// Assert that no directory below the destination root is empty.
    pub fn assert_no_empty_dirs(&self) {
        let snap = self.snapshot_dst();
        for dir in &snap.dirs {
            let full = self.dst().join(dir);
            let empty = fs::read_dir(&full).unwrap().next().is_none();
            assert!(!empty, "Expected no empty directories, found {}", full.display());
        }
    }

    fn add_source(&self, dir: &str, id: u64, content: &[u8]) -> PathBuf {
        let path = self.src().join(dir).join(format!("{id:07}.pdf"));
        fs::write(&path, content).unwrap();
        path
    }
}

/// Capture every directory and file below `root`.
pub fn snapshot(root: &Path) -> TreeSnapshot {
    let mut snap = TreeSnapshot {
        dirs: BTreeSet::new(),
        files: BTreeMap::new(),
    };
    if root.is_dir() {
        walk(root, root, &mut snap);
    }
    snap
}

fn walk(root: &Path, dir: &Path, snap: &mut TreeSnapshot) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        let rel = path.strip_prefix(root).unwrap().to_path_buf();
        if path.is_dir() {
            snap.dirs.insert(rel);
            walk(root, &path, snap);
        } else {
            snap.files.insert(rel, fs::read(&path).unwrap());
        }
    }
}

#[cfg(unix)]
fn same_inode(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    let (ma, mb) = (fs::metadata(a).unwrap(), fs::metadata(b).unwrap());
    ma.dev() == mb.dev() && ma.ino() == mb.ino()
}

#[cfg(not(unix))]
fn same_inode(a: &Path, b: &Path) -> bool {
    fs::read(a).unwrap() == fs::read(b).unwrap()
}
