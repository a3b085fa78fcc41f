//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Global flags may appear before or after the subcommand.
//! - --debug is a shorthand for --log-level debug and wins over it.
//! - Paths have surrounding quotes trimmed (Windows shells often pass them through).

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};

/// Strip UTF-8 BOMs and migrate a package namespace across a source tree.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Source tree fixes for a package rename")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(long, global = true, help = "Show what would change, but do not modify files/directories")]
    pub dry_run: bool,

    /// Print where pkgfix looks for its config file, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Remove a leading UTF-8 byte order mark from every matching file.
    StripBom(StripBomArgs),
    /// Rename the namespace directories and rewrite package/import statements.
    RenameNamespace(RenameNamespaceArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StripBomArgs {
    /// Directory to scan (default: config `bom_root`, else current directory).
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// File extension to process, without the dot.
    #[arg(long, short = 'e', value_name = "EXT")]
    pub extension: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RenameNamespaceArgs {
    /// Project directory containing `src/` (default: config `project_root`, else current directory).
    #[arg(value_name = "PROJECT_ROOT", value_hint = ValueHint::DirPath)]
    pub project_root: Option<PathBuf>,

    /// Namespace to replace, e.g. com.applytrack.
    #[arg(long, value_name = "NS")]
    pub from: Option<String>,

    /// Replacement namespace, e.g. com.applyfollow.
    #[arg(long, value_name = "NS")]
    pub to: Option<String>,

    /// File extension to process, without the dot.
    #[arg(long, short = 'e', value_name = "EXT")]
    pub extension: Option<String>,

    /// Source root holding a package tree, relative to PROJECT_ROOT. Repeatable; replaces the configured list.
    #[arg(long = "source-root", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub source_roots: Vec<PathBuf>,

    /// Statement keyword to rewrite (`<keyword> <namespace>`). Repeatable; replaces the configured list.
    #[arg(long = "keyword", value_name = "KW")]
    pub keywords: Vec<String>,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        match &self.command {
            Some(Command::StripBom(a)) => {
                if let Some(root) = &a.root {
                    cfg.bom_root = sanitize_path(root);
                }
                if let Some(ext) = &a.extension {
                    cfg.extension = ext.clone();
                }
            }
            Some(Command::RenameNamespace(a)) => {
                if let Some(root) = &a.project_root {
                    cfg.project_root = sanitize_path(root);
                }
                if let Some(ns) = &a.from {
                    cfg.old_namespace = ns.clone();
                }
                if let Some(ns) = &a.to {
                    cfg.new_namespace = ns.clone();
                }
                if let Some(ext) = &a.extension {
                    cfg.extension = ext.clone();
                }
                if !a.source_roots.is_empty() {
                    cfg.source_roots = a.source_roots.iter().map(|p| sanitize_path(p)).collect();
                }
                if !a.keywords.is_empty() {
                    cfg.keywords = a.keywords.clone();
                }
            }
            None => {}
        }
    }
}

/// Trim surrounding single/double quotes left by shells (PowerShell, CMD)
/// and one trailing separator, without touching a bare root like "/".
fn sanitize_path(p: &Path) -> PathBuf {
    let s = p.to_string_lossy();
    let trimmed = s.trim();
    let mut inner = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        return p.to_path_buf();
    };
    if inner.len() > 1 && (inner.ends_with('\\') || inner.ends_with('/')) {
        inner.pop();
    }
    PathBuf::from(inner)
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_trims_matching_quotes_only() {
        assert_eq!(sanitize_path(Path::new("\"C:/repo/backend/\"")), PathBuf::from("C:/repo/backend"));
        assert_eq!(sanitize_path(Path::new("'/srv/app'")), PathBuf::from("/srv/app"));
        assert_eq!(sanitize_path(Path::new("/srv/app/")), PathBuf::from("/srv/app/"));
        assert_eq!(sanitize_path(Path::new("\"/\"")), PathBuf::from("/"));
    }
}
