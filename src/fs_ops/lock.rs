//! Advisory directory lock.
//! Serializes processes that mutate the same directory (a user's home or data
//! directory) by holding an exclusive flock on a sidecar file inside it.
//!
//! Design:
//! - The lock file is `.lock` inside the target directory. It is created on
//!   first use and never removed; its presence is not the lock state, the flock
//!   on an open descriptor is.
//! - Acquisition blocks until the lock is free. There is no timeout: contention
//!   never produces an error, only I/O failures do.
//! - Releasing unlocks first, then closes the descriptor, and reports the first
//!   error from either step. Release is idempotent; dropping an unreleased
//!   guard releases it best-effort.
//!
//! Limitations:
//! - The lock is advisory and per-machine. Processes that don't take the same
//!   lock are not excluded, and network filesystems with different lock
//!   semantics may not honor it at all.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::trace;

#[cfg(unix)]
use std::os::fd::IntoRawFd;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Name of the sidecar lock file created inside a locked directory.
pub const LOCK_FILE_NAME: &str = ".lock";

/// Exclusive lock held on a directory.
///
/// Call [`DirLock::release`] on every exit path to observe release errors;
/// otherwise the lock is released when the guard is dropped.
#[derive(Debug)]
pub struct DirLock {
    file: Option<File>,
    path: PathBuf,
}

impl DirLock {
    /// Path of the lock file backing this guard.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True until the first call to [`DirLock::release`].
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Unlock, then close the descriptor. Returns the first error encountered.
    /// Calling this again after the first call is a no-op.
    pub fn release(&mut self) -> io::Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };
        let unlocked = FileExt::unlock(&file);
        let closed = close_file(file);
        trace!(path = %self.path.display(), "lock released");
        unlocked.and(closed)
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

#[cfg(unix)]
fn close_file(file: File) -> io::Result<()> {
    let fd = file.into_raw_fd();
    // SAFETY: `fd` was just taken out of an owned File and is closed exactly once.
    if unsafe { libc::close(fd) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
fn close_file(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}

fn lock_file_path(dir: &Path) -> PathBuf {
    dir.join(LOCK_FILE_NAME)
}

fn open_lock_file(lock_path: &Path) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true).truncate(false);
    #[cfg(unix)]
    opts.custom_flags(libc::O_CLOEXEC).mode(0o600);
    opts.open(lock_path)
}

/// Acquire an exclusive lock on `dir`, blocking until it is available.
///
/// Errors opening the lock file (missing or unwritable directory) and OS-level
/// lock failures are returned unchanged.
pub fn lock_dir(dir: &Path) -> io::Result<DirLock> {
    let lock_path = lock_file_path(dir);
    let start = Instant::now();

    let file = open_lock_file(&lock_path)?;
    // Dropping `file` on error closes the descriptor.
    file.lock_exclusive()?;

    let waited = start.elapsed();
    trace!(
        path = %lock_path.display(),
        waited_ms = waited.as_millis() as u64,
        "lock acquired"
    );
    Ok(DirLock {
        file: Some(file),
        path: lock_path,
    })
}

/// Non-blocking attempt to lock `dir`.
/// Returns Ok(None) if another holder has the lock.
pub fn try_lock_dir(dir: &Path) -> io::Result<Option<DirLock>> {
    let lock_path = lock_file_path(dir);
    let file = open_lock_file(&lock_path)?;

    match file.try_lock_exclusive() {
        Ok(()) => {
            trace!(path = %lock_path.display(), "try-lock success");
            Ok(Some(DirLock {
                file: Some(file),
                path: lock_path,
            }))
        }
        Err(e) if is_contended(&e) => {
            trace!(path = %lock_path.display(), "try-lock would block");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn is_contended(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::WouldBlock {
        return true;
    }
    // fs2 surfaces the raw errno; kind mapping differs across std versions.
    e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
