/*!
 * Bridge Configuration
 *
 * Settings the emulator session hands to the file-system bridge:
 * where the guest root lives, what the guest believes its program
 * name is, and whether stat timestamps are exposed.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the confinement root
pub const ENV_ROOT: &str = "GUEST_VFS_ROOT";

/// Environment variable naming the guest package
pub const ENV_PACKAGE: &str = "GUEST_VFS_PACKAGE";

/// Environment variable toggling stat timestamps
pub const ENV_WRITE_STAT_TIMES: &str = "GUEST_VFS_WRITE_STAT_TIMES";

const DEFAULT_ROOT: &str = "vfs";
const DEFAULT_PACKAGE: &str = "com.example.guest";

/// Configuration loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    #[diagnostic(
        code(config::read_failed),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    #[diagnostic(
        code(config::malformed),
        help("Expected a JSON object with root_dir, package_name and write_stat_times.")
    )]
    Malformed(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue { key: &'static str, value: String },
}

/// File-system bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Host directory all guest paths are confined to
    pub root_dir: PathBuf,

    /// Content served as `/proc/self/cmdline`
    pub package_name: String,

    /// Write real access/modify/change times into stat buffers.
    /// Disable for output that does not depend on host timestamps.
    pub write_stat_times: bool,
}

impl BridgeConfig {
    pub fn new<P: Into<PathBuf>>(root_dir: P, package_name: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            package_name: package_name.into(),
            write_stat_times: true,
        }
    }

    /// Builder-style toggle for stat timestamps
    pub fn with_stat_times(mut self, enabled: bool) -> Self {
        self.write_stat_times = enabled;
        self
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build from environment variables, falling back to defaults
    ///
    /// Environment variables:
    /// - GUEST_VFS_ROOT: confinement root (default: ./vfs)
    /// - GUEST_VFS_PACKAGE: guest program name
    /// - GUEST_VFS_WRITE_STAT_TIMES: "1"/"true" or "0"/"false" (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(root) = std::env::var(ENV_ROOT) {
            config.root_dir = PathBuf::from(root);
        }
        if let Ok(package) = std::env::var(ENV_PACKAGE) {
            config.package_name = package;
        }
        if let Ok(value) = std::env::var(ENV_WRITE_STAT_TIMES) {
            config.write_stat_times = match value.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_WRITE_STAT_TIMES,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT, DEFAULT_PACKAGE)
    }
}
