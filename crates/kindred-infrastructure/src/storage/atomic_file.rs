//! Atomic file replacement and advisory locking.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtomicFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Replaces `path` with `bytes` via a sibling tmp file, fsync and rename.
/// Readers see either the old content or the new, never a partial write.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), AtomicFileError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(bytes)?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Creates `path` with `bytes`, failing with `AlreadyExists` if it is
/// already there. The content is fsynced in a sibling tmp file and then
/// hard-linked into place, so the existence check and the publish are one
/// step and readers never see a partial file.
pub(crate) fn write_new(path: &Path, bytes: &[u8]) -> Result<(), AtomicFileError> {
    let tmp_path = temp_path(path)?;
    // A tmp file left by a concurrent writer of the same path counts as taken.
    let mut tmp_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)?;

    let published = tmp_file
        .write_all(bytes)
        .and_then(|()| tmp_file.sync_all())
        .and_then(|()| fs::hard_link(&tmp_path, path));
    drop(tmp_file);
    let _ = fs::remove_file(&tmp_path);

    published?;
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, AtomicFileError> {
    let invalid = |what: &str| {
        AtomicFileError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Path has no {what}"),
        ))
    };
    let parent = path.parent().ok_or_else(|| invalid("parent directory"))?;
    let file_name = path.file_name().ok_or_else(|| invalid("file name"))?;
    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// Exclusive lock on `<path>.lock`, released on drop.
pub struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    pub fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicFileError::Lock(format!("Failed to acquire lock: {e}")))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlocks with the handle; the lock file itself is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}
