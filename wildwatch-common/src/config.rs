//! Configuration loading and root folder resolution
//!
//! Settings come from three places, highest priority first:
//! 1. Command-line argument or environment variable (resolved by clap)
//! 2. TOML config file
//! 3. OS-dependent compiled defaults
//!
//! A missing config file is not an error. A config file that exists but
//! cannot be parsed is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Database file created inside the root folder
pub const DATABASE_FILE: &str = "wildwatch.db";

/// Settings that can appear in `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a config file
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Compiled-in fallbacks for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            host: "0.0.0.0".to_string(),
            port: 9874,
            log_level: "info".to_string(),
        }
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

/// Explicit overrides from the command line or environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ServiceConfig {
    /// Merge overrides, file values and defaults in priority order
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = CompiledDefaults::for_current_platform();

        Self {
            root_folder: overrides
                .root_folder
                .or(file.root_folder)
                .unwrap_or(defaults.root_folder),
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            log_level: file.log_level.unwrap_or(defaults.log_level),
        }
    }

    /// Create the root folder if it does not exist yet
    pub fn ensure_root_folder(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    /// Path of the SQLite database inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    /// `host:port` suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Default location of `config.toml` for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wildwatch").join("config.toml"))
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/wildwatch (or /var/lib/wildwatch for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("wildwatch"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/wildwatch"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("wildwatch"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/wildwatch"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("wildwatch"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\wildwatch"))
    } else {
        PathBuf::from("./wildwatch_data")
    }
}
