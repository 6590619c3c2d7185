//! Filesystem primitives: directory lock, symlink-aware rename, ownership
//! transfer, and a few passthrough helpers.

#[cfg(unix)]
mod chown;
mod helpers;
mod lock;
mod rename;
#[cfg(unix)]
mod util;

#[cfg(unix)]
pub use chown::{ChownSummary, IdChange, OwnershipFilter, chown_tree};
pub use helpers::{copy_file, file_exists, is_dir_empty, touch};
pub use lock::{DirLock, LOCK_FILE_NAME, lock_dir, try_lock_dir};
pub use rename::lrename;
