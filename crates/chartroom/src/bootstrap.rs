//! Bootstrap schema sources.
//!
//! When no diagram exists yet, an installation can ship a schema document
//! named [`BOOTSTRAP_SCHEMA_FILE`] that seeds the first diagram. The document
//! is optional: sources report its absence as `Ok(None)`.

use std::{
    future::Future,
    io,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::BootstrapError;

/// Well-known file name of the bootstrap schema document.
pub const BOOTSTRAP_SCHEMA_FILE: &str = "bs-schema.json";

/// Source of the raw bootstrap schema document.
pub trait BootstrapSource {
    /// Fetch the document text, or `Ok(None)` when there is none.
    fn fetch(&self) -> impl Future<Output = Result<Option<String>, BootstrapError>>;
}

/// Reads the bootstrap document from a file.
#[derive(Debug, Clone)]
pub struct FileBootstrap {
    path: PathBuf,
}

impl FileBootstrap {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Looks for [`BOOTSTRAP_SCHEMA_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(BOOTSTRAP_SCHEMA_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BootstrapSource for FileBootstrap {
    async fn fetch(&self) -> Result<Option<String>, BootstrapError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = self.path.display().to_string(); "No bootstrap schema file");
                Ok(None)
            }
            Err(source) => Err(BootstrapError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// A bootstrap document held in memory, e.g. compiled into the binary.
#[derive(Debug, Clone)]
pub struct StaticBootstrap(String);

impl StaticBootstrap {
    pub fn new(document: impl Into<String>) -> Self {
        Self(document.into())
    }
}

impl BootstrapSource for StaticBootstrap {
    async fn fetch(&self) -> Result<Option<String>, BootstrapError> {
        Ok(Some(self.0.clone()))
    }
}

/// No bootstrap document.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBootstrap;

impl BootstrapSource for NoBootstrap {
    async fn fetch(&self) -> Result<Option<String>, BootstrapError> {
        Ok(None)
    }
}

/// An optional source; `None` behaves like [`NoBootstrap`].
impl<B: BootstrapSource> BootstrapSource for Option<B> {
    async fn fetch(&self) -> Result<Option<String>, BootstrapError> {
        match self {
            Some(source) => source.fetch().await,
            None => Ok(None),
        }
    }
}
