//! Some sugar around advisory file locks
//!
//! ```no_run
//! use sundry::lock::LockFile;
//!
//! # fn main() -> sundry::Result<()> {
//! let lock = LockFile::acquire("/var/lock/perfectly-normal.lock")?;
//! // do what you need to do ...
//! drop(lock);
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use sundry_core::{Error, Result};
use tracing::debug;

/// An exclusive advisory lock on a file, released on drop
///
/// The owning process id is written into the file, which helps
/// debugging a stuck lock. By default the file is deleted on release;
/// see [`keep_file`](Self::keep_file).
#[derive(Debug)]
pub struct LockFile {
    file: File,
    path: PathBuf,
    pid: u32,
    autodelete: bool,
}

impl LockFile {
    /// Acquire the lock, failing if it is held elsewhere
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::try_acquire(path)? {
            Some(lock) => Ok(lock),
            None => Err(Error::file_system(
                path,
                "lock",
                io::Error::new(
                    io::ErrorKind::WouldBlock,
                    "already locked by another process",
                ),
            )),
        }
    }

    /// Acquire the lock, answering `None` if it is held elsewhere
    pub fn try_acquire(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::file_system(parent, "create directory", e))?;
            }
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Error::file_system(path, "open", e))?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                let pid = std::process::id();
                file.set_len(0)
                    .and_then(|()| writeln!(file, "{pid}"))
                    .and_then(|()| file.sync_all())
                    .map_err(|e| Error::file_system(path, "write pid", e))?;
                debug!(path = %path.display(), pid, "lock acquired");
                Ok(Some(Self {
                    file,
                    path: path.to_path_buf(),
                    pid,
                    autodelete: true,
                }))
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                debug!(path = %path.display(), "lock is busy");
                Ok(None)
            }
            Err(e) => Err(Error::file_system(path, "lock", e)),
        }
    }

    /// The process id written into the lock file
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leave the file behind on release instead of deleting it
    pub fn keep_file(&mut self) {
        self.autodelete = false;
    }

    /// The pid recorded in a lock file, e.g. to inspect a stuck lock
    pub fn holder(path: impl AsRef<Path>) -> Result<Option<u32>> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Ok(contents.trim().parse().ok()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::file_system(path, "read", e)),
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
        if self.autodelete {
            // deletion failures are logged, not raised
            if let Err(e) = fs::remove_file(&self.path) {
                debug!(path = %self.path.display(), error = %e, "could not delete lock file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lock_is_exclusive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.lock");

        let lock1 = LockFile::acquire(&path).unwrap();
        assert!(LockFile::try_acquire(&path).unwrap().is_none());
        assert!(LockFile::acquire(&path).is_err());

        drop(lock1);
        let lock3 = LockFile::acquire(&path).unwrap();
        drop(lock3);
    }

    #[test]
    fn test_lock_file_records_pid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pid.lock");

        let lock = LockFile::acquire(&path).unwrap();
        assert_eq!(LockFile::holder(&path).unwrap(), Some(lock.pid()));
        assert_eq!(lock.pid(), std::process::id());
    }

    #[test]
    fn test_autodelete_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.lock");

        let lock = LockFile::acquire(&path).unwrap();
        assert!(path.exists());
        drop(lock);
        assert!(!path.exists());
        assert_eq!(LockFile::holder(&path).unwrap(), None);
    }

    #[test]
    fn test_keep_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kept.lock");

        let mut lock = LockFile::acquire(&path).unwrap();
        lock.keep_file();
        drop(lock);
        assert!(path.exists());
    }

    #[test]
    fn test_parent_directory_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deeply/nested/dir/x.lock");

        let lock = LockFile::acquire(&path).unwrap();
        drop(lock);
    }
}
