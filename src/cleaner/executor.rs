//! Filesystem primitives used by the orchestrator.

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Size in bytes of a file, or of every regular file under a directory.
///
/// Unreadable entries are skipped. Symlinks are counted as links, never
/// followed.
pub fn entry_size(path: &Path) -> u64 {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => dir_size(path),
        Ok(meta) => meta.len(),
        Err(_) => 0,
    }
}

fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Remove a file, symlink or directory tree, returning the bytes freed.
///
/// A path that no longer exists yields `ErrorKind::NotFound`.
pub fn remove_entry(path: &Path) -> io::Result<u64> {
    let meta = fs::symlink_metadata(path)?;
    let size = if meta.is_dir() { dir_size(path) } else { meta.len() };

    if meta.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }

    Ok(size)
}
