//! Thin filesystem passthroughs used around the locking and ownership code.
//! These return io::Result untouched so callers can match on ErrorKind.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// True if something exists at `path`. Only NotFound maps to `false`;
/// other stat failures are returned.
pub fn file_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// True if the directory has no entries. Reads at most one entry.
pub fn is_dir_empty(path: &Path) -> io::Result<bool> {
    let mut entries = fs::read_dir(path)?;
    match entries.next() {
        None => Ok(true),
        Some(Ok(_)) => Ok(false),
        Some(Err(e)) => Err(e),
    }
}

/// Create an empty file at `path` if none exists. An existing entry is left
/// alone, whatever its permissions.
pub fn touch(path: &Path) -> io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    opts.mode(0o600);
    match opts.open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// Copy `src` to `dst`, truncating `dst` if it exists and giving it the
/// permissions of `src`. The destination is fsynced before returning.
///
/// A new destination is created with the source mode already applied, so it is
/// never more permissive than `src` while the content is written.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    let mut input = File::open(src)?;
    let perms = input.metadata()?.permissions();

    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        opts.mode(perms.mode());
    }
    let mut output = opts.open(dst)?;
    // Covers a pre-existing destination and bits the umask cleared.
    io::copy(&mut input, &mut output)?;
    output.set_permissions(perms)?;
    output.sync_all()
}
