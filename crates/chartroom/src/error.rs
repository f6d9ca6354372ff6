//! Error types for Chartroom operations.
//!
//! - [`ChartroomError`] - Top-level error returned by sessions and hosts.
//! - [`StoreError`] - Failures of a [`DiagramStore`](crate::store::DiagramStore).
//! - [`BootstrapError`] - Failures reading the bootstrap schema.
//! - [`ResolveError`] - Why a resolution fell back to a dialog. These are
//!   recovered inside the resolver and only logged or reported.

use std::{io, path::PathBuf};

use thiserror::Error;

use chartroom_core::identifier::{DiagramId, IdError};
use chartroom_import::ImportError;

/// The main error type for Chartroom operations.
///
/// The `Import` variant keeps the imported source so diagnostics can be
/// rendered with snippets.
#[derive(Debug, Error)]
pub enum ChartroomError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("{err}")]
    Import { err: ImportError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid diagram id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Not a diagram route: {0}")]
    InvalidRoute(String),

    #[error("Gave up resolving the diagram after {0} redirects")]
    RedirectLoop(usize),
}

impl ChartroomError {
    /// Create a new `Import` error with the associated source document.
    pub fn new_import_error(err: ImportError, src: impl Into<String>) -> Self {
        Self::Import {
            err,
            src: src.into(),
        }
    }
}

/// Failure of a diagram store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("diagram `{0}` already exists")]
    Conflict(DiagramId),

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("diagram file {} is not valid: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file for one id holds a diagram with another id.
    #[error("diagram file {} holds diagram `{found}`, expected `{expected}`", path.display())]
    IdMismatch {
        path: PathBuf,
        expected: DiagramId,
        found: DiagramId,
    },

    #[error("cannot encode diagram `{id}`: {source}")]
    Encode {
        id: DiagramId,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage task failed: {0}")]
    Task(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure reading the bootstrap schema document.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("cannot read bootstrap schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reason a resolution ended in a dialog rather than a diagram.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Lookup missed, or the store failed while looking up.
    #[error("diagram `{id}` not found")]
    NotFound {
        id: DiagramId,
        #[source]
        source: Option<StoreError>,
    },

    #[error("cannot list diagrams: {0}")]
    List(#[source] StoreError),

    /// No bootstrap document, or it could not be read.
    #[error("no bootstrap schema available")]
    FetchUnavailable(#[source] Option<BootstrapError>),

    #[error("bootstrap schema is invalid: {0}")]
    Parse(#[from] ImportError),

    #[error("cannot save bootstrap diagram: {0}")]
    Persist(#[source] StoreError),
}
