//! UTF-8 byte-order-mark removal.
//!
//! Files are handled as raw bytes: only the three marker bytes are removed and
//! the rest of the file is written back byte-identical. Content is never
//! decoded, so files in any encoding are safe to scan.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::FileFailure;
use super::io::{read_bytes, write_in_place};
use super::walk::{Visit, source_files};
use crate::errors::PkgfixError;
use crate::shutdown;

pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Return the content after the marker when `bytes` starts with a UTF-8 BOM.
#[inline]
pub fn strip_bom(bytes: &[u8]) -> Option<&[u8]> {
    bytes.strip_prefix(&UTF8_BOM[..])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomOptions {
    pub root: PathBuf,
    /// Extension without the leading dot
    pub extension: String,
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct BomReport {
    /// Matching files visited
    pub scanned: usize,
    /// Files whose BOM was removed (or would be, on a dry run)
    pub fixed: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl BomReport {
    pub fn fixed_count(&self) -> usize {
        self.fixed.len()
    }
}

/// Strip the BOM from every matching file under `opts.root`.
///
/// Returns `PkgfixError::Interrupted` if a shutdown is requested; files
/// handled before that point keep their new content.
pub fn remove_boms(opts: &BomOptions) -> Result<BomReport> {
    info!(root = %opts.root.display(), "Scanning for files with BOM");
    let mut report = BomReport::default();

    for visit in source_files(&opts.root, &opts.extension) {
        if shutdown::is_requested() {
            warn!(fixed = report.fixed_count(), "Interrupted; stopping BOM scan");
            return Err(PkgfixError::Interrupted.into());
        }
        match visit {
            Visit::Error(failure) => {
                warn!(path = %failure.path.display(), error = %failure.message, "Error processing entry");
                report.failures.push(failure);
            }
            Visit::File(path) => {
                report.scanned += 1;
                match fix_file(&path, opts.dry_run) {
                    Ok(true) => report.fixed.push(path),
                    Ok(false) => {}
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Error processing file");
                        report.failures.push(FileFailure {
                            path,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }
    }

    info!(
        scanned = report.scanned,
        fixed = report.fixed_count(),
        failed = report.failures.len(),
        "BOM scan finished"
    );
    Ok(report)
}

/// Returns true when the file had a BOM.
fn fix_file(path: &Path, dry_run: bool) -> Result<bool> {
    let content = read_bytes(path)?;
    let Some(rest) = strip_bom(&content) else {
        debug!(path = %path.display(), "No BOM");
        return Ok(false);
    };
    if dry_run {
        info!(path = %path.display(), "Dry-run: would remove BOM");
        return Ok(true);
    }
    info!(path = %path.display(), "Removing BOM from: {}", path.display());
    write_in_place(path, rest)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn strip_bom_only_matches_full_marker_at_start() {
        assert_eq!(strip_bom(b"\xEF\xBB\xBFpublic"), Some(&b"public"[..]));
        assert_eq!(strip_bom(b"\xEF\xBB\xBF"), Some(&b""[..]));
        assert_eq!(strip_bom(b"\xEF\xBB"), None);
        assert_eq!(strip_bom(b""), None);
        assert_eq!(strip_bom(b"x\xEF\xBB\xBF"), None);
    }

    #[test]
    fn strip_bom_removes_a_single_marker() {
        let doubled = b"\xEF\xBB\xBF\xEF\xBB\xBFx";
        assert_eq!(strip_bom(doubled), Some(&b"\xEF\xBB\xBFx"[..]));
    }

    #[test]
    fn fix_file_reports_whether_marker_was_present() {
        let dir = assert_fs::TempDir::new().unwrap();
        let with = dir.child("With.java");
        with.write_binary(b"\xEF\xBB\xBFclass With {}").unwrap();
        let without = dir.child("Without.java");
        without.write_str("class Without {}").unwrap();

        assert!(fix_file(with.path(), false).unwrap());
        assert!(!fix_file(without.path(), false).unwrap());
        with.assert("class With {}");
        without.assert("class Without {}");
    }
}
