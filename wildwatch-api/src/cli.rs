//! Command-line arguments for wildwatch-api

use std::path::PathBuf;

use clap::Parser;
use wildwatch_common::config::{default_config_path, ConfigOverrides};

/// Command-line arguments; each falls back to an environment variable
#[derive(Parser, Debug)]
#[command(name = "wildwatch-api")]
#[command(about = "Wildlife sighting reporting service")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "WILDWATCH_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "WILDWATCH_HOST")]
    pub host: Option<String>,

    /// Folder holding the database
    #[arg(short, long, env = "WILDWATCH_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// Path to config.toml
    #[arg(short, long, env = "WILDWATCH_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root_folder: self.root_folder.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }

    /// Explicit config path, else the platform default
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_config_path)
    }
}
