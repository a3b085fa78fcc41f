//! Config module.
//! Provides configuration types, the config file location, XML loading, and
//! validation into the option structs consumed by `ops`.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV_VAR, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::normalize_extension;
pub use xml::{load_config, load_config_from_xml_path};

/// Defaults mirror the one rename this tool was first written for.
pub const EXTENSION_DEFAULT: &str = "java";
pub const OLD_NAMESPACE_DEFAULT: &str = "com.applytrack";
pub const NEW_NAMESPACE_DEFAULT: &str = "com.applyfollow";
pub const SOURCE_ROOTS_DEFAULT: [&str; 2] = ["src/main/java", "src/test/java"];
pub const KEYWORDS_DEFAULT: [&str; 2] = ["package", "import"];
