//! Recursive, filtered ownership transfer.
//!
//! Mirrors shadow-utils' `chown_tree`: every entry under the root is visited
//! once, symlinks are never followed, and for each entry the owner and the
//! group are rewritten independently when they match the requested `from` id.
//!
//! Notes:
//! - Metadata is re-read with `lstat` for every entry instead of trusting what
//!   the directory listing returned; hard links and earlier changes in the same
//!   walk can make the two disagree.
//! - The walk stops at the first failure. Entries already changed keep their
//!   new ownership; there is no rollback.
//! - Nothing here takes the directory lock. Callers that need the walk
//!   serialized against other writers must hold a [`crate::DirLock`].

use std::fs;
use std::os::unix::fs::{MetadataExt, lchown};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::ChownError;

/// Rewrite entries whose id equals `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdChange {
    pub from: u32,
    pub to: u32,
}

impl IdChange {
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }
}

/// Which owner and/or group ids to migrate. An empty filter is rejected by
/// [`chown_tree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnershipFilter {
    pub uid: Option<IdChange>,
    pub gid: Option<IdChange>,
}

impl OwnershipFilter {
    pub fn new(uid: Option<IdChange>, gid: Option<IdChange>) -> Self {
        Self { uid, gid }
    }

    /// Filter that only migrates owners.
    pub fn uid(from: u32, to: u32) -> Self {
        Self {
            uid: Some(IdChange::new(from, to)),
            gid: None,
        }
    }

    /// Filter that only migrates groups.
    pub fn gid(from: u32, to: u32) -> Self {
        Self {
            uid: None,
            gid: Some(IdChange::new(from, to)),
        }
    }

    /// Add (or replace) the group migration.
    pub fn with_gid(mut self, from: u32, to: u32) -> Self {
        self.gid = Some(IdChange::new(from, to));
        self
    }

    /// Add (or replace) the owner migration.
    pub fn with_uid(mut self, from: u32, to: u32) -> Self {
        self.uid = Some(IdChange::new(from, to));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.uid.is_none() && self.gid.is_none()
    }
}

/// Counters reported by a completed [`chown_tree`] walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChownSummary {
    pub visited: u64,
    pub owner_changed: u64,
    pub group_changed: u64,
}

/// Walk `root` and migrate ownership according to `filter`.
///
/// Returns [`ChownError::EmptyFilter`] before touching the filesystem when
/// neither side of the filter is set. A missing `root` surfaces as
/// [`ChownError::Walk`] on the first step.
pub fn chown_tree(root: &Path, filter: &OwnershipFilter) -> Result<ChownSummary, ChownError> {
    if filter.is_empty() {
        return Err(ChownError::EmptyFilter);
    }

    let mut summary = ChownSummary::default();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .follow_root_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ChownError::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        summary.visited += 1;

        let meta = fs::symlink_metadata(path).map_err(|e| ChownError::Metadata {
            path: path.to_path_buf(),
            source: e,
        })?;
        let (uid, gid) = (meta.uid(), meta.gid());

        if let Some(change) = filter.uid
            && uid == change.from
        {
            lchown(path, Some(change.to), None).map_err(|e| ChownError::ChangeOwner {
                path: path.to_path_buf(),
                source: e,
            })?;
            summary.owner_changed += 1;
            debug!(path = %path.display(), from = change.from, to = change.to, "owner changed");
        }

        if let Some(change) = filter.gid
            && gid == change.from
        {
            lchown(path, None, Some(change.to)).map_err(|e| ChownError::ChangeGroup {
                path: path.to_path_buf(),
                source: e,
            })?;
            summary.group_changed += 1;
            debug!(path = %path.display(), from = change.from, to = change.to, "group changed");
        }
    }

    Ok(summary)
}
