//! Mutating filesystem operations used by the link synchronizer

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Create a directory and all missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Fail the way `ensure_dir(path)` would if an existing non-directory
/// blocks the path, without creating anything.
pub fn check_creatable(path: &Path) -> Result<()> {
    let Some(existing) = path.ancestors().find(|a| a.exists()) else {
        return Ok(());
    };
    if existing.is_dir() {
        Ok(())
    } else {
        Err(Error::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("{} is not a directory", existing.display()),
            ),
        ))
    }
}

/// Create a hard link at `dst` pointing to the same content as `src`.
///
/// Fails if `dst` already exists. Both paths must be on the same filesystem.
pub fn hard_link(src: &Path, dst: &Path) -> Result<()> {
    fs::hard_link(src, dst).map_err(|source| Error::Link {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })
}

/// Remove a single file (or symlink).
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}

/// Remove an empty directory.
pub fn remove_dir(path: &Path) -> Result<()> {
    fs::remove_dir(path).map_err(|e| Error::io(path, e))
}

/// Check whether two paths name the same underlying file.
///
/// Compares device and inode numbers, so two hard links to the same content
/// are the same file while two byte-identical copies are not.
#[cfg(unix)]
pub fn same_file(a: &Path, b: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let meta_a = fs::metadata(a).map_err(|e| Error::io(a, e))?;
    let meta_b = fs::metadata(b).map_err(|e| Error::io(b, e))?;
    Ok(meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino())
}

/// Check whether two paths name the same underlying file.
///
/// File identity is not exposed on this platform; only identical paths match.
#[cfg(not(unix))]
pub fn same_file(a: &Path, b: &Path) -> Result<bool> {
    Ok(a == b)
}
