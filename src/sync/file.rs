//! Atomic file operations for the mirror.
//!
//! - Atomic writes: write to a temp file, sync to disk, then rename
//! - Conditional writes: skip files whose content is already current

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::sync::hash::{content_hash, has_changed};

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file atomically.
///
/// This function:
/// 1. Writes content to a temporary file next to the target
/// 2. Calls `fsync` to ensure data is on disk
/// 3. Atomically renames the temp file to the target path
///
/// If any step fails, the original file (if any) remains untouched.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Write `content` unless the file already holds exactly that content.
///
/// Returns `true` if the file was written.
///
/// # Errors
///
/// Returns an error if the existing file cannot be read or the write fails.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    let stored = match fs::read(path) {
        Ok(existing) => Some(content_hash(&existing)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    if !has_changed(&content_hash(content.as_bytes()), stored.as_deref()) {
        return Ok(false);
    }

    atomic_write(path, content)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("doc.opml");

        atomic_write(&path, "line 1\nline 2\n").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "line 1\nline 2\n");
        assert!(!temp_dir.path().join("a").join("b").join("doc.opml.tmp").exists());
    }

    #[test]
    fn test_write_if_changed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.opml");

        assert!(write_if_changed(&path, "v1").unwrap());
        assert!(!write_if_changed(&path, "v1").unwrap());
        assert!(write_if_changed(&path, "v2").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }
}
