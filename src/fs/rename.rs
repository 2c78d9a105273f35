//! Same-directory renames for module state transitions.
//!
//! A module's activation state lives in its file name, so enabling or
//! disabling it is a `rename(2)` inside the area directory. Because the
//! source and destination share a directory the rename never crosses a
//! device, and it either happens completely or not at all.

use std::fs;
use std::io;
use std::path::Path;

/// Rename `source` to `destination`, refusing to replace an existing file.
///
/// Returns `ErrorKind::AlreadyExists` when `destination` is present, leaving
/// both files untouched. On any other failure the source keeps its name.
pub fn rename_no_clobber<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> io::Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if destination.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", destination.display()),
        ));
    }

    fs::rename(source, destination)
}
