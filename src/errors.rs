//! Typed error definitions for pkgfix.
//! Provides a small set of well-known failure modes for better logs and tests.
//! Per-file problems are not errors here: they are collected in reports.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PkgfixError {
    #[error("{name} does not exist: {path}")]
    RootNotFound { name: &'static str, path: PathBuf },

    #[error("{name} is not a directory: {path}")]
    NotADirectory { name: &'static str, path: PathBuf },

    #[error("Invalid namespace '{value}': {reason}")]
    InvalidNamespace { value: String, reason: &'static str },

    #[error("Old and new namespace are identical: {0}")]
    SameNamespace(String),

    #[error("New namespace '{new}' starts with old namespace '{old}'; a second run would rewrite it again")]
    NamespaceOverlap { old: String, new: String },

    #[error("Invalid file extension '{0}'")]
    InvalidExtension(String),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl PkgfixError {
    /// Stable numeric code used in structured log fields.
    pub fn code(&self) -> u16 {
        match self {
            PkgfixError::RootNotFound { .. } => 10,
            PkgfixError::NotADirectory { .. } => 11,
            PkgfixError::InvalidNamespace { .. } => 20,
            PkgfixError::SameNamespace(_) => 21,
            PkgfixError::NamespaceOverlap { .. } => 22,
            PkgfixError::InvalidExtension(_) => 30,
            PkgfixError::Interrupted => 130,
        }
    }
}
