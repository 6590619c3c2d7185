use clap::Parser;
use fileutils::cli::{Args, Command};
use fileutils::config::types::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["fsutil", "--debug", "--log-level", "quiet", "lock", "/tmp"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["fsutil", "lock", "/tmp", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["fsutil", "lock", "/tmp"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "fsutil",
        "--log-level",
        "info",
        "--json",
        "--log-file",
        "/var/log/fsutil.log",
        "rename",
        "a",
        "b",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.json);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log/fsutil.log")));
}

#[test]
fn apply_overrides_keeps_config_when_flags_absent() {
    let args = Args::parse_from(["fsutil", "rename", "a", "b"]);
    let mut cfg = Config {
        log_level: LogLevel::Quiet,
        log_file: Some(PathBuf::from("/x.log")),
        json: true,
    };
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_level, LogLevel::Quiet);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/x.log")));
    assert!(cfg.json);
}

#[test]
fn lock_collects_trailing_command() {
    let args = Args::parse_from(["fsutil", "lock", "/home/u", "--", "ls", "-l"]);
    match args.command {
        Command::Lock { dir, command } => {
            assert_eq!(dir, PathBuf::from("/home/u"));
            assert_eq!(command, vec!["ls", "-l"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn chown_tree_builds_filter() {
    use fileutils::{IdChange, OwnershipFilter};

    let args = Args::parse_from([
        "fsutil", "chown-tree", "/home/u", "--from-uid", "1000", "--to-uid", "3000",
    ]);
    assert_eq!(
        args.command.ownership_filter(),
        Some(OwnershipFilter::uid(1000, 3000))
    );

    let args = Args::parse_from([
        "fsutil", "chown-tree", "/home/u", "--from-uid", "1", "--to-uid", "2", "--from-gid", "3",
        "--to-gid", "4",
    ]);
    let filter = args.command.ownership_filter().unwrap();
    assert_eq!(filter.uid, Some(IdChange::new(1, 2)));
    assert_eq!(filter.gid, Some(IdChange::new(3, 4)));
}

#[test]
fn chown_tree_requires_a_pair() {
    assert!(Args::try_parse_from(["fsutil", "chown-tree", "/home/u"]).is_err());
}

#[test]
fn chown_tree_rejects_half_pairs() {
    assert!(
        Args::try_parse_from(["fsutil", "chown-tree", "/home/u", "--from-uid", "1000"]).is_err()
    );
    assert!(
        Args::try_parse_from([
            "fsutil", "chown-tree", "/home/u", "--from-uid", "1", "--to-uid", "2", "--to-gid", "3"
        ])
        .is_err()
    );
}
