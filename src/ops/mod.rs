//! Tree operations: BOM removal and namespace migration.
//!
//! Both walk a directory sequentially, read each matching file whole, and
//! rewrite it in place only when its content actually changes. Per-file
//! failures are collected as `FileFailure`s; only validation errors and
//! interruption abort an operation.

pub mod bom;
pub(crate) mod io;
pub mod namespace;
mod walk;

use std::fmt;
use std::path::PathBuf;

pub use bom::{BomOptions, BomReport, UTF8_BOM, remove_boms, strip_bom};
pub use namespace::{
    DirOutcome, Namespace, RenameOptions, RenameReport, rename_namespace, rename_namespace_dirs,
    rewrite_references,
};

/// A file (or directory) that could not be processed; the run went on without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
