use std::fs;
use tempfile::tempdir;

use fileutils::{copy_file, file_exists, is_dir_empty, touch};

#[test]
fn file_exists_distinguishes_missing() {
    let td = tempdir().unwrap();
    let p = td.path().join("f");
    assert!(!file_exists(&p).unwrap());
    fs::write(&p, "x").unwrap();
    assert!(file_exists(&p).unwrap());
    assert!(file_exists(td.path()).unwrap());
}

#[cfg(unix)]
#[test]
fn file_exists_propagates_other_errors() {
    let td = tempdir().unwrap();
    let f = td.path().join("f");
    fs::write(&f, "x").unwrap();
    // Traversing through a regular file is ENOTDIR, not NotFound.
    let err = file_exists(&f.join("child")).unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::ENOTDIR));
}

#[test]
fn is_dir_empty_reports_contents() {
    let td = tempdir().unwrap();
    assert!(is_dir_empty(td.path()).unwrap());
    fs::write(td.path().join("f"), "x").unwrap();
    assert!(!is_dir_empty(td.path()).unwrap());
    assert!(is_dir_empty(&td.path().join("missing")).is_err());
}

#[test]
fn touch_creates_and_preserves() {
    let td = tempdir().unwrap();
    let p = td.path().join("t");
    touch(&p).unwrap();
    assert_eq!(fs::metadata(&p).unwrap().len(), 0);

    fs::write(&p, "content").unwrap();
    touch(&p).unwrap();
    assert_eq!(fs::read_to_string(&p).unwrap(), "content");
}

#[cfg(unix)]
#[test]
fn touch_new_file_is_private() {
    use std::os::unix::fs::PermissionsExt;
    let td = tempdir().unwrap();
    let p = td.path().join("t");
    touch(&p).unwrap();
    let mode = fs::metadata(&p).unwrap().permissions().mode() & 0o777;
    // umask can only clear bits.
    assert_eq!(mode & !0o600, 0);
}

#[cfg(unix)]
#[test]
fn touch_existing_read_only_file_is_a_noop() {
    use std::os::unix::fs::PermissionsExt;
    let td = tempdir().unwrap();
    let p = td.path().join("ro");
    fs::write(&p, "keep").unwrap();
    fs::set_permissions(&p, fs::Permissions::from_mode(0o400)).unwrap();

    touch(&p).unwrap();

    assert_eq!(fs::read_to_string(&p).unwrap(), "keep");
    let mode = fs::metadata(&p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o400);
}

#[test]
fn copy_file_overwrites_destination() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dst = td.path().join("dst");
    fs::write(&src, "short").unwrap();
    fs::write(&dst, "a much longer previous content").unwrap();

    copy_file(&src, &dst).unwrap();

    assert_eq!(fs::read_to_string(&dst).unwrap(), "short");
    assert_eq!(fs::read_to_string(&src).unwrap(), "short");
}

#[cfg(unix)]
#[test]
fn copy_file_preserves_mode() {
    use std::os::unix::fs::PermissionsExt;
    let td = tempdir().unwrap();
    let src = td.path().join("script.sh");
    fs::write(&src, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&src, fs::Permissions::from_mode(0o750)).unwrap();
    let dst = td.path().join("copy.sh");

    copy_file(&src, &dst).unwrap();

    let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o750);
}

#[cfg(unix)]
#[test]
fn copy_file_private_source_stays_private() {
    use std::os::unix::fs::PermissionsExt;
    let td = tempdir().unwrap();
    let src = td.path().join("secret");
    fs::write(&src, "token").unwrap();
    fs::set_permissions(&src, fs::Permissions::from_mode(0o600)).unwrap();
    let dst = td.path().join("secret.copy");

    copy_file(&src, &dst).unwrap();

    let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert_eq!(fs::read_to_string(&dst).unwrap(), "token");
}

#[test]
fn copy_missing_source_fails() {
    let td = tempdir().unwrap();
    let err = copy_file(&td.path().join("nope"), &td.path().join("dst")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(!td.path().join("dst").exists());
}
