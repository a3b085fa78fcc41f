//! Package namespace migration.
//!
//! Two phases, both tolerant of re-runs:
//! 1. rename `<project>/<source_root>/<old/as/path>` to the new path for each
//!    source root (a missing directory means "already done");
//! 2. walk `<project>/src` and rewrite `<keyword> <old>` to `<keyword> <new>`
//!    in every matching file, writing only files that changed.

use anyhow::Result;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::FileFailure;
use super::io::{describe_io_error, read_text, write_in_place};
use super::walk::{Visit, source_files};
use crate::errors::PkgfixError;
use crate::shutdown;

/// Directory under the project root whose files get their references rewritten.
pub const SCAN_DIR: &str = "src";

/// A dotted package name such as `com.applytrack`.
///
/// Segments are non-empty, ASCII alphanumeric or `_`, and do not start with a
/// digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    pub fn parse(s: &str) -> Result<Self, PkgfixError> {
        let value = s.trim();
        let invalid = |reason| PkgfixError::InvalidNamespace {
            value: s.to_string(),
            reason,
        };
        if value.is_empty() {
            return Err(invalid("empty"));
        }
        for seg in value.split('.') {
            let Some(first) = seg.chars().next() else {
                return Err(invalid("empty segment"));
            };
            if first.is_ascii_digit() {
                return Err(invalid("segment starts with a digit"));
            }
            if !seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid("segments may only contain ASCII letters, digits and '_'"));
            }
        }
        Ok(Namespace(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `com.applytrack` -> `com/applytrack` (platform separator).
    pub fn to_rel_path(&self) -> PathBuf {
        self.0.split('.').collect()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Namespace {
    type Err = PkgfixError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOptions {
    pub project_root: PathBuf,
    pub old: Namespace,
    pub new: Namespace,
    /// Relative to `project_root`, e.g. `src/main/java`
    pub source_roots: Vec<PathBuf>,
    pub keywords: Vec<String>,
    /// Extension without the leading dot
    pub extension: String,
    pub dry_run: bool,
}

/// What happened to one source root's namespace directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirOutcome {
    /// Renamed (or would be, on a dry run)
    Renamed { from: PathBuf, to: PathBuf },
    /// Old directory absent; most likely renamed by an earlier run
    Missing(PathBuf),
    Failed { from: PathBuf, to: PathBuf, message: String },
}

#[derive(Debug, Default)]
pub struct RenameReport {
    pub dirs: Vec<DirOutcome>,
    /// Matching files visited
    pub scanned: usize,
    /// Files whose references were rewritten (or would be, on a dry run)
    pub updated: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl RenameReport {
    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }

    pub fn renamed_dirs(&self) -> usize {
        self.dirs
            .iter()
            .filter(|d| matches!(d, DirOutcome::Renamed { .. }))
            .count()
    }
}

/// Replace every `<keyword> <old>` with `<keyword> <new>`, keyword by keyword.
/// Matching is literal, so `import com.applytrack.model.User;` and
/// `import static com.applytrack...` differ: only the former is rewritten.
/// Borrows `text` when nothing matched.
pub fn rewrite_references<'a>(
    text: &'a str,
    old: &Namespace,
    new: &Namespace,
    keywords: &[String],
) -> Cow<'a, str> {
    let mut out = Cow::Borrowed(text);
    for kw in keywords {
        let from = format!("{kw} {old}");
        if out.contains(&from) {
            let to = format!("{kw} {new}");
            out = Cow::Owned(out.replace(&from, &to));
        }
    }
    out
}

/// Phase 1: move each source root's namespace directory.
pub fn rename_namespace_dirs(opts: &RenameOptions) -> Vec<DirOutcome> {
    let old_rel = opts.old.to_rel_path();
    let new_rel = opts.new.to_rel_path();

    opts.source_roots
        .iter()
        .map(|root| {
            let base = opts.project_root.join(root);
            let from = base.join(&old_rel);
            let to = base.join(&new_rel);
            rename_dir(&from, &to, opts.dry_run)
        })
        .collect()
}

fn rename_dir(from: &Path, to: &Path, dry_run: bool) -> DirOutcome {
    let failed = |message: String| {
        warn!(from = %from.display(), to = %to.display(), error = %message, "Directory rename failed");
        DirOutcome::Failed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            message,
        }
    };

    match fs::symlink_metadata(from) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(dir = %from.display(), "Directory not found (maybe already renamed?)");
            return DirOutcome::Missing(from.to_path_buf());
        }
        Err(e) => return failed(describe_io_error("stat", from, &e)),
        Ok(meta) if !meta.is_dir() => {
            return failed(format!("'{}' exists but is not a directory", from.display()));
        }
        Ok(_) => {}
    }
    // An empty target is replaced; a populated one is never merged into.
    // A case-only rename on a case-insensitive filesystem sees `to` as `from`.
    let replace_empty_target = match target_state(from, to) {
        Ok(TargetState::Absent | TargetState::SameDir) => false,
        Ok(TargetState::EmptyDir) => true,
        Ok(TargetState::Occupied) => {
            return failed(format!(
                "target '{}' already exists; merge the two trees by hand",
                to.display()
            ));
        }
        Err(e) => return failed(describe_io_error("stat", to, &e)),
    };
    if dry_run {
        info!(from = %from.display(), to = %to.display(), "Dry-run: would rename directory");
        return DirOutcome::Renamed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        };
    }

    if let Some(parent) = to.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            return failed(describe_io_error("create dir", parent, &e));
        }
    }
    if replace_empty_target {
        if let Err(e) = fs::remove_dir(to) {
            return failed(describe_io_error("remove empty dir", to, &e));
        }
    }
    info!(from = %from.display(), to = %to.display(), "Renaming directory");
    match fs::rename(from, to) {
        Ok(()) => DirOutcome::Renamed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        },
        Err(e) => failed(describe_io_error("rename", from, &e)),
    }
}

enum TargetState {
    Absent,
    EmptyDir,
    /// `to` resolves to `from` itself (case-insensitive filesystem)
    SameDir,
    Occupied,
}

fn target_state(from: &Path, to: &Path) -> io::Result<TargetState> {
    let to_meta = match fs::symlink_metadata(to) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TargetState::Absent),
        Err(e) => return Err(e),
    };
    if !to_meta.is_dir() {
        return Ok(TargetState::Occupied);
    }
    if same_dir(from, to)? {
        return Ok(TargetState::SameDir);
    }
    if fs::read_dir(to)?.next().is_none() {
        Ok(TargetState::EmptyDir)
    } else {
        Ok(TargetState::Occupied)
    }
}

#[cfg(unix)]
fn same_dir(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;
    let (ma, mb) = (fs::symlink_metadata(a)?, fs::symlink_metadata(b)?);
    Ok(ma.dev() == mb.dev() && ma.ino() == mb.ino())
}

#[cfg(not(unix))]
fn same_dir(a: &Path, b: &Path) -> io::Result<bool> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

/// Run both phases. Per-directory and per-file problems are recorded in the
/// report; only an interrupt aborts with an error.
pub fn rename_namespace(opts: &RenameOptions) -> Result<RenameReport> {
    info!(project = %opts.project_root.display(), old = %opts.old, new = %opts.new, "Processing project");
    let mut report = RenameReport {
        dirs: rename_namespace_dirs(opts),
        ..RenameReport::default()
    };

    let scan_root = opts.project_root.join(SCAN_DIR);
    if !scan_root.is_dir() {
        warn!(dir = %scan_root.display(), "Source directory not found; no files to update");
        return Ok(report);
    }

    for visit in source_files(&scan_root, &opts.extension) {
        if shutdown::is_requested() {
            warn!(updated = report.updated_count(), "Interrupted; stopping reference rewrite");
            return Err(PkgfixError::Interrupted.into());
        }
        match visit {
            Visit::Error(failure) => {
                warn!(path = %failure.path.display(), error = %failure.message, "Error processing entry");
                report.failures.push(failure);
            }
            Visit::File(path) => {
                report.scanned += 1;
                match update_file(&path, opts) {
                    Ok(true) => report.updated.push(path),
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
        updated = report.updated_count(),
        failed = report.failures.len(),
        "Reference rewrite finished"
    );
    Ok(report)
}

/// Returns true when the file's content changed.
fn update_file(path: &Path, opts: &RenameOptions) -> Result<bool> {
    let content = read_text(path)?;
    let rewritten = rewrite_references(&content, &opts.old, &opts.new, &opts.keywords);
    let Cow::Owned(new_content) = rewritten else {
        debug!(path = %path.display(), "No references");
        return Ok(false);
    };
    if new_content == content {
        return Ok(false);
    }
    if opts.dry_run {
        info!(path = %path.display(), "Dry-run: would update references");
        return Ok(true);
    }
    info!(path = %path.display(), "Updating references in: {}", path.display());
    write_in_place(path, new_content.as_bytes())?;
    Ok(true)
}
