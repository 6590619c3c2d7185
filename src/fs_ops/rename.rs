//! Symlink-aware rename.
//! - A destination that is not a symlink (or does not exist) gets a plain
//!   `rename(2)`, so same-filesystem atomic replace semantics apply.
//! - A destination that is a symlink is resolved to its final target first and
//!   the target is replaced; the link entry itself stays in place.
//! - If resolution fails we refuse, rather than replace the link entry and
//!   change what the path means for everyone following it.

use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

use crate::errors::{RenameError, SymlinkResolutionError};

const RESOLVE_FAILED_MSG: &str = "failed to resolve symlinks in destination";

/// Rename `src` to `dst`, following `dst` if it is a symlink.
///
/// Returns [`RenameError::SymlinkResolution`] if `dst` is a symlink that can't
/// be resolved; `src` and `dst` are untouched in that case. Any other stat or
/// rename failure is returned as [`RenameError::Io`].
pub fn lrename(src: &Path, dst: &Path) -> Result<(), RenameError> {
    let is_symlink = match fs::symlink_metadata(dst) {
        Ok(meta) => meta.file_type().is_symlink(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(RenameError::Io(e)),
    };

    if !is_symlink {
        return rename_and_sync(src, dst);
    }

    let resolved = fs::canonicalize(dst)
        .map_err(|e| SymlinkResolutionError::new(RESOLVE_FAILED_MSG, e))?;
    trace!(
        link = %dst.display(),
        target = %resolved.display(),
        "destination is a symlink; renaming onto its target"
    );
    rename_and_sync(src, &resolved)
}

fn rename_and_sync(src: &Path, dst: &Path) -> Result<(), RenameError> {
    fs::rename(src, dst)?;

    // Persist the new directory entry; a failed fsync doesn't undo the rename.
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
