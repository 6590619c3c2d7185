//! Directory fsync used after renames.

use std::fs::File;
use std::io;
use std::path::Path;

pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    // An empty parent means the current directory.
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let f = File::open(dir)?;
    f.sync_all()
}
