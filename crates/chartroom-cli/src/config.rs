//! Configuration file loading for the CLI
//!
//! This module finds and loads the TOML configuration file and derives the
//! storage and bootstrap locations from it and the command line.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use chartroom::{
    ChartroomError,
    bootstrap::{BOOTSTRAP_SCHEMA_FILE, FileBootstrap},
    config::AppConfig,
};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for ChartroomError {
    fn from(err: ConfigError) -> Self {
        ChartroomError::Config(err.to_string())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "chartroom", "chartroom")
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (chartroom/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ChartroomError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("chartroom/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = project_dirs() {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ChartroomError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

/// Folder holding the diagram store.
///
/// The `--store` flag wins over the configured path, which wins over the
/// platform data directory.
///
/// # Errors
///
/// Returns an error when no location is given and the platform has no data
/// directory.
pub fn storage_dir(flag: Option<&str>, config: &AppConfig) -> Result<PathBuf, ChartroomError> {
    if let Some(path) = flag {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.storage().path() {
        return Ok(path.to_path_buf());
    }

    let proj_dirs = project_dirs().ok_or_else(|| {
        ConfigError::Validation(
            "cannot determine a data directory; pass --store or set storage.path".to_string(),
        )
    })?;
    Ok(proj_dirs.data_dir().join("diagrams"))
}

/// Bootstrap schema source, or `None` when bootstrapping is disabled.
///
/// An explicit `--bootstrap` path is always used. Otherwise the configured
/// path applies, falling back to [`BOOTSTRAP_SCHEMA_FILE`] in the working
/// directory.
pub fn bootstrap_source(flag: Option<&str>, config: &AppConfig) -> Option<FileBootstrap> {
    if let Some(path) = flag {
        return Some(FileBootstrap::new(path));
    }

    let settings = config.bootstrap();
    if !settings.enabled() {
        debug!("Bootstrap schema disabled by configuration");
        return None;
    }

    let path = settings
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(BOOTSTRAP_SCHEMA_FILE));
    Some(FileBootstrap::new(path))
}
