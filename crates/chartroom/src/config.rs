//! Configuration types for Chartroom.
//!
//! All types implement [`serde::Deserialize`] for loading from TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration, including the default diagram.
//! - [`StorageConfig`] - Where diagrams are stored.
//! - [`BootstrapConfig`] - Whether and where to find the bootstrap schema.
//!
//! # Example
//!
//! ```
//! # use chartroom::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     default_diagram_id = "d1"
//!
//!     [bootstrap]
//!     enabled = false
//! "#).unwrap();
//!
//! assert_eq!(config.default_diagram_id().map(|id| id.as_str()), Some("d1"));
//! assert!(!config.bootstrap().enabled());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use chartroom_core::identifier::DiagramId;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagram opened when the editor starts without one.
    #[serde(default)]
    default_diagram_id: Option<DiagramId>,

    #[serde(default)]
    storage: StorageConfig,

    #[serde(default)]
    bootstrap: BootstrapConfig,
}

impl AppConfig {
    pub fn new(storage: StorageConfig, bootstrap: BootstrapConfig) -> Self {
        Self {
            default_diagram_id: None,
            storage,
            bootstrap,
        }
    }

    /// Returns a copy of this configuration with a default diagram set.
    pub fn with_default_diagram(mut self, id: DiagramId) -> Self {
        self.default_diagram_id = Some(id);
        self
    }

    pub fn default_diagram_id(&self) -> Option<&DiagramId> {
        self.default_diagram_id.as_ref()
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn bootstrap(&self) -> &BootstrapConfig {
        &self.bootstrap
    }
}

/// Diagram storage settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Folder holding one JSON file per diagram.
    #[serde(default)]
    path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Bootstrap schema settings.
///
/// Enabled by default; without a path the host's default location is used.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_enabled")]
    enabled: bool,

    #[serde(default)]
    path: Option<PathBuf>,
}

fn default_enabled() -> bool {
    true
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: None,
        }
    }
}

impl BootstrapConfig {
    pub fn new(enabled: bool, path: Option<PathBuf>) -> Self {
        Self { enabled, path }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
