//! Core configuration types.
//! - Config holds runtime settings for both operations with built-in defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{
    EXTENSION_DEFAULT, KEYWORDS_DEFAULT, NEW_NAMESPACE_DEFAULT, OLD_NAMESPACE_DEFAULT,
    SOURCE_ROOTS_DEFAULT,
};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Per-file progress and warnings (default)
    #[default]
    Normal,
    /// Also skipped files and directory decisions
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration shared by `strip-bom` and `rename-namespace`.
///
/// Values here are unvalidated; `Config::bom_options` and
/// `Config::rename_options` check them before any file is touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Tree scanned by the BOM remover
    pub bom_root: PathBuf,
    /// Project directory holding `src/` for the namespace renamer
    pub project_root: PathBuf,
    /// File extension to process, without the leading dot
    pub extension: String,
    pub old_namespace: String,
    pub new_namespace: String,
    /// Source roots (relative to project_root) whose namespace directory is renamed
    pub source_roots: Vec<PathBuf>,
    /// Statement keywords whose `<keyword> <namespace>` prefix is rewritten
    pub keywords: Vec<String>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, report what would change but do not modify the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bom_root: PathBuf::from("."),
            project_root: PathBuf::from("."),
            extension: EXTENSION_DEFAULT.to_string(),
            old_namespace: OLD_NAMESPACE_DEFAULT.to_string(),
            new_namespace: NEW_NAMESPACE_DEFAULT.to_string(),
            source_roots: SOURCE_ROOTS_DEFAULT.iter().map(PathBuf::from).collect(),
            keywords: KEYWORDS_DEFAULT.iter().map(|s| s.to_string()).collect(),
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
        }
    }
}
