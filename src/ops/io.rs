//! Whole-file read/write helpers with actionable error messages.
//!
//! Every helper returns an `anyhow::Error` whose message names the operation,
//! the path and a platform hint, so it can be stored in a report verbatim:
//!
//!   read 'src/A.java': Permission denied (os error 13); check ownership and permissions. [os code: 13]

use anyhow::{Result, anyhow};
use std::fs;
use std::io;
use std::path::Path;

/// Hint for well-known raw OS error codes.
#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => Some("check ownership and permissions."),
        libc::EROFS => Some("read-only filesystem; cannot write here."),
        libc::ENOSPC => Some("insufficient space on device."),
        libc::EISDIR => Some("path is a directory, not a file."),
        libc::ENOTEMPTY | libc::EEXIST => Some("target already exists; remove or merge it by hand."),
        libc::EXDEV => Some("cross-filesystem; rename not possible."),
        libc::EBUSY => Some("resource busy; is an editor or IDE holding the file?"),
        libc::ENAMETOOLONG => Some("filename or path too long."),
        _ => None,
    }
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions."),
        32 => Some("sharing violation; file is open in another program."),
        80 | 183 => Some("target already exists; remove or merge it by hand."),
        112 => Some("insufficient disk space."),
        206 => Some("filename or path too long (MAX_PATH exceeded)."),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

/// Format a human-friendly message with op/path plus a hint.
pub(crate) fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(code) = e.raw_os_error() {
        if let Some(hint) = os_hint(code) {
            msg.push_str("; ");
            msg.push_str(hint);
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else if e.kind() == io::ErrorKind::PermissionDenied {
        msg.push_str("; check ownership and permissions.");
    }
    msg
}

/// Adapter for `.map_err(...)` in anyhow::Result code.
pub(crate) fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io_error(op, path, &e))
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(io_error_with_help("read", path))
}

/// Read a file as strict UTF-8. A BOM, if any, is kept as U+FEFF.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).map_err(|e| {
        anyhow!(
            "decode '{}' as UTF-8: invalid byte sequence at offset {}",
            path.display(),
            e.utf8_error().valid_up_to()
        )
    })
}

/// Overwrite an existing file in place (truncate + write the same path).
/// The inode, and with it permissions and ownership, is kept.
pub(crate) fn write_in_place(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(io_error_with_help("write", path))
}
