//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - chown-tree takes owner and group migrations as from/to pairs; each pair is
//!   all-or-nothing and at least one pair is required.

use clap::{ArgGroup, Parser, Subcommand, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
#[cfg(unix)]
use crate::fs_ops::{IdChange, OwnershipFilter};

/// Directory locking, symlink-aware rename and ownership migration.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Filesystem primitives for user management")]
pub struct Args {
    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Also append logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Read settings from this XML file instead of the default location.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Hold the directory lock while running COMMAND (or just acquire and release it).
    Lock {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,

        /// Command to run while the lock is held.
        #[arg(last = true, value_name = "COMMAND")]
        command: Vec<OsString>,
    },

    /// Rename SRC to DST; if DST is a symlink, replace what it points at.
    Rename {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dst: PathBuf,
    },

    /// Recursively migrate owner and/or group ids under ROOT without following symlinks.
    #[command(group(
        ArgGroup::new("ids")
            .args(["from_uid", "from_gid"])
            .required(true)
            .multiple(true)
    ))]
    ChownTree {
        #[arg(value_hint = ValueHint::DirPath)]
        root: PathBuf,

        #[arg(long, requires = "to_uid")]
        from_uid: Option<u32>,
        #[arg(long, requires = "from_uid")]
        to_uid: Option<u32>,

        #[arg(long, requires = "to_gid")]
        from_gid: Option<u32>,
        #[arg(long, requires = "from_gid")]
        to_gid: Option<u32>,
    },
}

impl Command {
    /// Ownership filter for `chown-tree`; None for other subcommands.
    #[cfg(unix)]
    pub fn ownership_filter(&self) -> Option<OwnershipFilter> {
        match self {
            Command::ChownTree {
                from_uid,
                to_uid,
                from_gid,
                to_gid,
                ..
            } => {
                let uid = (*from_uid).zip(*to_uid).map(|(f, t)| IdChange::new(f, t));
                let gid = (*from_gid).zip(*to_gid).map(|(f, t)| IdChange::new(f, t));
                Some(OwnershipFilter::new(uid, gid))
            }
            _ => None,
        }
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.json {
            cfg.json = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
