//! Config module.
//! Provides configuration types, the default config path, and XML loading
//! for the `fsutil` binary.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path, parse_config_xml};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FILEUTILS_CONFIG";
