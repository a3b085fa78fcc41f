//! Config validation logic.
//! Turns a loaded Config into the checked option structs used by `ops`:
//! roots must be existing directories, the extension must be usable as a
//! filename suffix, and the namespace pair must be well-formed.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::PkgfixError;
use crate::ops::bom::BomOptions;
use crate::ops::namespace::{Namespace, RenameOptions};

use super::types::Config;

impl Config {
    /// Validated options for the BOM remover.
    pub fn bom_options(&self) -> Result<BomOptions> {
        ensure_dir_exists_and_is_dir(&self.bom_root, "bom_root")?;
        let extension = normalize_extension(&self.extension)?;
        info!(
            "Config validated: bom_root='{}' extension='{}' dry_run={}",
            self.bom_root.display(),
            extension,
            self.dry_run
        );
        Ok(BomOptions {
            root: self.bom_root.clone(),
            extension,
            dry_run: self.dry_run,
        })
    }

    /// Validated options for the namespace renamer.
    pub fn rename_options(&self) -> Result<RenameOptions> {
        ensure_dir_exists_and_is_dir(&self.project_root, "project_root")?;
        let extension = normalize_extension(&self.extension)?;
        let old = Namespace::parse(&self.old_namespace)?;
        let new = Namespace::parse(&self.new_namespace)?;

        if old == new {
            error!("old and new namespace are identical: {old}");
            return Err(PkgfixError::SameNamespace(old.to_string()).into());
        }
        // "package com.app" is a prefix of "package com.apple": a re-run would
        // rewrite the already migrated statements a second time.
        if new.as_str().starts_with(old.as_str()) {
            error!("new namespace {new} starts with old namespace {old}");
            return Err(PkgfixError::NamespaceOverlap {
                old: old.to_string(),
                new: new.to_string(),
            }
            .into());
        }

        let keywords: Vec<String> = self
            .keywords
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        debug!(?keywords, source_roots = ?self.source_roots, "rename settings");

        info!(
            "Config validated: project_root='{}' {} -> {} extension='{}' dry_run={}",
            self.project_root.display(),
            old,
            new,
            extension,
            self.dry_run
        );
        Ok(RenameOptions {
            project_root: self.project_root.clone(),
            old,
            new,
            source_roots: self.source_roots.clone(),
            keywords,
            extension,
            dry_run: self.dry_run,
        })
    }
}

/// Strip surrounding whitespace and one leading dot; reject empty values and
/// anything containing a path separator.
pub fn normalize_extension(raw: &str) -> Result<String, PkgfixError> {
    let trimmed = raw.trim();
    let ext = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if ext.is_empty() || ext.contains(['/', '\\']) {
        return Err(PkgfixError::InvalidExtension(raw.to_string()));
    }
    Ok(ext.to_string())
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &'static str) -> Result<(), PkgfixError> {
    match fs::metadata(path) {
        Err(_) => {
            error!("{name} does not exist: {}", path.display());
            Err(PkgfixError::RootNotFound {
                name,
                path: path.to_path_buf(),
            })
        }
        Ok(meta) if !meta.is_dir() => {
            error!("{name} is not a directory: {}", path.display());
            Err(PkgfixError::NotADirectory {
                name,
                path: path.to_path_buf(),
            })
        }
        Ok(_) => Ok(()),
    }
}
