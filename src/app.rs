//! Application orchestrator.
//! Loads/merges config, initializes logging, and dispatches the subcommand to
//! the library primitives. Returns the process exit code.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command as ProcessCommand;
use tracing::{debug, error, info};

use fileutils::cli::{Args, Command};
use fileutils::config::load_config;
use fileutils::output as out;
use fileutils::{Config, RenameError, lock_dir, lrename};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<i32> {
    // Config file first, CLI flags win.
    // Errors surface once, through main.
    let mut cfg = load_config(args.config.as_deref())?.unwrap_or_else(Config::default);
    args.apply_overrides(&mut cfg);

    // Keep the guard alive until we return so the file appender flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), cfg.json)
        .context("initialize logging")?;

    debug!(?args, "starting fsutil");

    match &args.command {
        Command::Lock { dir, command } => run_lock(dir, command),
        Command::Rename { src, dst } => run_rename(src, dst),
        #[cfg(unix)]
        Command::ChownTree { root, .. } => {
            let filter = args
                .command
                .ownership_filter()
                .unwrap_or_default();
            run_chown_tree(root, &filter)
        }
        #[cfg(not(unix))]
        Command::ChownTree { .. } => {
            out::print_error("chown-tree is only supported on Unix");
            Ok(2)
        }
    }
}

fn run_lock(dir: &Path, command: &[std::ffi::OsString]) -> Result<i32> {
    let mut lock = lock_dir(dir).with_context(|| format!("lock directory '{}'", dir.display()))?;
    info!(path = %lock.path().display(), "lock acquired");

    let status = match command.split_first() {
        Some((program, rest)) => {
            let spawned = ProcessCommand::new(program).args(rest).status();
            match spawned {
                Ok(status) => status.code().unwrap_or(1),
                Err(e) => {
                    // Release before reporting so the lock is never held past this point.
                    let _ = lock.release();
                    return Err(e)
                        .with_context(|| format!("run '{}'", program.to_string_lossy()));
                }
            }
        }
        None => 0,
    };

    lock.release()
        .with_context(|| format!("release lock '{}'", lock.path().display()))?;
    info!(path = %lock.path().display(), "lock released");
    Ok(status)
}

fn run_rename(src: &Path, dst: &Path) -> Result<i32> {
    match lrename(src, dst) {
        Ok(()) => {
            info!(source = %src.display(), dest = %dst.display(), "rename completed");
            out::print_success(&format!("renamed '{}' -> '{}'", src.display(), dst.display()));
            Ok(0)
        }
        Err(e) => {
            let code = e.code();
            match &e {
                RenameError::SymlinkResolution(inner) => {
                    error!(code, kind = "symlink_resolution", dest = %dst.display(), cause = %inner.cause(), "rename failed")
                }
                RenameError::Io(io) => {
                    error!(code, kind = "io", source = %src.display(), dest = %dst.display(), error = %io, "rename failed")
                }
            }
            out::print_error(&format!(
                "rename '{}' -> '{}': {}",
                src.display(),
                dst.display(),
                e
            ));
            Ok(code)
        }
    }
}

#[cfg(unix)]
fn run_chown_tree(root: &Path, filter: &fileutils::OwnershipFilter) -> Result<i32> {
    use fileutils::{ChownError, chown_tree};

    match chown_tree(root, filter) {
        Ok(summary) => {
            info!(
                root = %root.display(),
                visited = summary.visited,
                owner_changed = summary.owner_changed,
                group_changed = summary.group_changed,
                "ownership migration completed"
            );
            out::print_success(&format!(
                "{} entries visited, {} owners changed, {} groups changed",
                summary.visited, summary.owner_changed, summary.group_changed
            ));
            Ok(0)
        }
        Err(e) => {
            let code = e.code();
            match &e {
                ChownError::EmptyFilter => {
                    error!(code, kind = "empty_filter", "ownership migration refused")
                }
                other => {
                    let path = other.path().map(|p| p.display().to_string());
                    error!(code, kind = "walk_aborted", path = ?path, error = %other, "ownership migration aborted")
                }
            }
            out::print_error(&e.to_string());
            if !matches!(e, ChownError::EmptyFilter) {
                out::print_notice("entries processed before the failure keep their new ownership");
            }
            Ok(code)
        }
    }
}
