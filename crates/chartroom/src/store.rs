//! Diagram persistence.
//!
//! [`DiagramStore`] is the seam between the resolver and storage. Two
//! implementations are provided: [`MemoryStore`] for embedding and tests,
//! and [`FolderStore`] keeping one JSON file per diagram.

mod folder;
mod memory;

pub use folder::FolderStore;
pub use memory::MemoryStore;

use std::future::Future;

use chartroom_core::{
    diagram::{Diagram, DiagramSummary},
    identifier::DiagramId,
};

use crate::error::StoreError;

/// Asynchronous access to stored diagrams.
pub trait DiagramStore {
    /// Load a diagram, returning `Ok(None)` when no diagram has this id.
    fn load(&self, id: &DiagramId) -> impl Future<Output = Result<Option<Diagram>, StoreError>>;

    /// List all stored diagrams, most recently updated first.
    fn list(&self) -> impl Future<Output = Result<Vec<DiagramSummary>, StoreError>>;

    /// Persist a new diagram.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if a diagram with the same id exists.
    fn add(&self, diagram: &Diagram) -> impl Future<Output = Result<(), StoreError>>;
}

/// Most recently updated first, ties broken by id.
pub(crate) fn sort_summaries(summaries: &mut [DiagramSummary]) {
    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
}
