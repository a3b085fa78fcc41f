//! Sorted, non-following directory walk yielding files with a given extension.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::FileFailure;

pub(crate) enum Visit {
    File(PathBuf),
    Error(FileFailure),
}

/// Suffix match on the file name, like `name.endswith(".java")`.
/// Compared on the lossy name so non-UTF-8 names still match their suffix.
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .map(|n| {
            let name = n.to_string_lossy();
            name.len() > extension.len()
                && name.ends_with(extension)
                && name[..name.len() - extension.len()].ends_with('.')
        })
        .unwrap_or(false)
}

/// Walk `root` in file-name order and yield every regular file whose name ends
/// in `.<extension>`. Symlinks are neither followed nor yielded. Entries that
/// cannot be read are yielded as `Visit::Error` so the caller can record them
/// and move on.
pub(crate) fn source_files<'a>(root: &Path, extension: &'a str) -> impl Iterator<Item = Visit> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(e) => {
                let ft = e.file_type();
                if ft.is_file() && has_extension(e.path(), extension) {
                    Some(Visit::File(e.into_path()))
                } else {
                    if ft.is_symlink() && has_extension(e.path(), extension) {
                        debug!(path = %e.path().display(), "Skipping symlink");
                    }
                    None
                }
            }
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                Some(Visit::Error(FileFailure {
                    path,
                    message: format!("walk: {err}"),
                }))
            }
        })
}
