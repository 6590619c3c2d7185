//! Typed error definitions for fileutils.
//! Lock and helper functions return plain `io::Error`; the rename and ownership
//! primitives have failure modes callers need to branch on, so they get enums.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Destination of a rename was a symlink that could not be resolved
/// (dangling, loop, permission denied on an intermediate component).
///
/// All instances compare equal: equality answers "is this the same kind of
/// error", never "same message/cause". The cause is reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("{msg}: {source}")]
pub struct SymlinkResolutionError {
    msg: String,
    #[source]
    source: io::Error,
}

impl SymlinkResolutionError {
    pub(crate) fn new(msg: impl Into<String>, source: io::Error) -> Self {
        Self {
            msg: msg.into(),
            source,
        }
    }

    /// The underlying resolution failure.
    pub fn cause(&self) -> &io::Error {
        &self.source
    }

    pub fn into_cause(self) -> io::Error {
        self.source
    }
}

impl PartialEq for SymlinkResolutionError {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for SymlinkResolutionError {}

/// Errors returned by [`crate::lrename`].
#[derive(Debug, Error)]
pub enum RenameError {
    #[error(transparent)]
    SymlinkResolution(#[from] SymlinkResolutionError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RenameError {
    pub fn is_symlink_resolution(&self) -> bool {
        matches!(self, RenameError::SymlinkResolution(_))
    }

    /// Stable numeric code for logs and process exit status.
    pub fn code(&self) -> i32 {
        match self {
            RenameError::SymlinkResolution(_) => 3,
            RenameError::Io(_) => 1,
        }
    }
}

/// Errors returned by [`crate::chown_tree`].
#[derive(Debug, Error)]
pub enum ChownError {
    #[error("at least one of the owner or group filters must be set")]
    EmptyFilter,

    #[error("walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("read metadata of {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to change ownership of {path}: {source}")]
    ChangeOwner {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to change group ownership of {path}: {source}")]
    ChangeGroup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ChownError {
    /// Path of the entry the walk stopped on, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ChownError::EmptyFilter => None,
            ChownError::Walk { path, .. }
            | ChownError::Metadata { path, .. }
            | ChownError::ChangeOwner { path, .. }
            | ChownError::ChangeGroup { path, .. } => Some(path),
        }
    }

    /// Stable numeric code for logs and process exit status.
    pub fn code(&self) -> i32 {
        match self {
            ChownError::EmptyFilter => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn symlink_errors_compare_equal_regardless_of_content() {
        let a = SymlinkResolutionError::new("one", io::Error::from(io::ErrorKind::NotFound));
        let b = SymlinkResolutionError::new("two", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(a, b);
    }

    #[test]
    fn symlink_error_exposes_cause() {
        let e = SymlinkResolutionError::new("resolve", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(e.cause().kind(), io::ErrorKind::NotFound);
        let src = e.source().expect("source");
        let io_src = src.downcast_ref::<io::Error>().expect("io source");
        assert_eq!(io_src.kind(), io::ErrorKind::NotFound);
        assert!(e.to_string().starts_with("resolve: "));
        assert_eq!(e.into_cause().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn symlink_error_survives_anyhow_round_trip() {
        let e: RenameError =
            SymlinkResolutionError::new("x", io::Error::from(io::ErrorKind::NotFound)).into();
        let any = anyhow::Error::new(e);
        let back = any.downcast_ref::<RenameError>().expect("downcast");
        assert!(back.is_symlink_resolution());
        assert_eq!(back.code(), 3);
    }

    #[test]
    fn chown_error_messages_name_the_change() {
        let owner = ChownError::ChangeOwner {
            path: PathBuf::from("/x"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let group = ChownError::ChangeGroup {
            path: PathBuf::from("/x"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(owner.to_string().contains("change ownership"));
        assert!(group.to_string().contains("change group ownership"));
        assert_eq!(owner.path(), Some(std::path::Path::new("/x")));
        assert_eq!(ChownError::EmptyFilter.path(), None);
    }
}
