//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Every field is optional; missing ones keep the built-in default.
//!
//! Notes:
//! - A missing file is not an error. A malformed file or an unknown field is.
//! - Directory validation happens in `validate`, not here.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    bom_root: Option<String>,
    project_root: Option<String>,
    extension: Option<String>,
    old_namespace: Option<String>,
    new_namespace: Option<String>,
    source_roots: Option<XmlList>,
    keywords: Option<XmlList>,
    log_level: Option<String>,
    log_file: Option<String>,
    dry_run: Option<bool>,
}

/// `<source_roots><item>src/main/java</item>...</source_roots>`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlList {
    #[serde(rename = "item", default)]
    items: Vec<String>,
}

impl XmlList {
    fn trimmed(self) -> Vec<String> {
        self.items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(p) = non_empty(parsed.bom_root) {
        cfg.bom_root = PathBuf::from(p);
    }
    if let Some(p) = non_empty(parsed.project_root) {
        cfg.project_root = PathBuf::from(p);
    }
    if let Some(ext) = non_empty(parsed.extension) {
        cfg.extension = ext;
    }
    if let Some(ns) = non_empty(parsed.old_namespace) {
        cfg.old_namespace = ns;
    }
    if let Some(ns) = non_empty(parsed.new_namespace) {
        cfg.new_namespace = ns;
    }
    if let Some(list) = parsed.source_roots {
        let roots = list.trimmed();
        if !roots.is_empty() {
            cfg.source_roots = roots.into_iter().map(PathBuf::from).collect();
        }
    }
    if let Some(list) = parsed.keywords {
        let kws = list.trimmed();
        if !kws.is_empty() {
            cfg.keywords = kws;
        }
    }
    if let Some(s) = non_empty(parsed.log_level) {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)
            .context("log_level")?;
    }
    cfg.log_file = non_empty(parsed.log_file).map(PathBuf::from);
    cfg.dry_run = parsed.dry_run.unwrap_or(false);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the config from `$PKGFIX_CONFIG` or the default location.
/// Returns the built-in defaults when no file exists there.
pub fn load_config() -> Result<Config> {
    let Some(path) = default_config_path() else {
        debug!("No config location could be determined; using defaults");
        return Ok(Config::default());
    };
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(Config::default());
    }
    debug!(path = %path.display(), "Loading config file");
    load_config_from_xml_path(&path)
}
