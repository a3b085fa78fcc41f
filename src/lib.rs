//! Core library for `pkgfix`.
//!
//! Two maintenance operations for a project rename:
//! - [`remove_boms`]: strip UTF-8 byte-order marks from source files;
//! - [`rename_namespace`]: move package directories and rewrite
//!   `package`/`import` statements to a new namespace.
//!
//! Configuration lives in [`config`]; the operations only see the validated
//! option structs produced by [`Config::bom_options`] and
//! [`Config::rename_options`].

pub mod cli;
pub mod config;
pub mod errors;
pub mod ops;
pub mod output;
pub mod platform;
pub mod shutdown;

pub use config::{
    CONFIG_ENV_VAR, Config, LogLevel, default_config_path, load_config, load_config_from_xml_path,
    path_has_symlink_ancestor,
};
pub use errors::PkgfixError;
pub use ops::{
    BomOptions, BomReport, DirOutcome, FileFailure, Namespace, RenameOptions, RenameReport,
    remove_boms, rename_namespace, rewrite_references, strip_bom,
};
