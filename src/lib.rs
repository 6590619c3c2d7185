//! Core library for `fileutils`.
//!
//! Three independent primitives for a privileged user-management tool:
//! - [`lock_dir`]: exclusive, blocking advisory lock on a directory.
//! - [`lrename`]: rename that replaces a symlinked destination's target
//!   instead of the link.
//! - [`chown_tree`]: recursive owner/group migration that never follows
//!   symlinks (Unix only).
//!
//! All three run synchronously on the caller's thread and share no state.
//! They report errors as values and never print; diagnostic `tracing` events
//! are emitted at trace/debug level only.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;

pub use config::{Config, LogLevel, default_config_path, path_has_symlink_ancestor};
pub use errors::{ChownError, RenameError, SymlinkResolutionError};
#[cfg(unix)]
pub use fs_ops::{ChownSummary, IdChange, OwnershipFilter, chown_tree};
pub use fs_ops::{
    DirLock, LOCK_FILE_NAME, copy_file, file_exists, is_dir_empty, lock_dir, lrename, touch,
    try_lock_dir,
};
