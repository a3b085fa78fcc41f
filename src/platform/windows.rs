//! Windows implementations of platform helpers.
//!
//! Windows lacks POSIX mode semantics and std offers no O_NOFOLLOW
//! equivalent; the symlink-ancestor check in the logger is the only defense.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Open log file for appending.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
