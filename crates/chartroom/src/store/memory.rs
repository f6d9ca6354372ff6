use std::{cell::RefCell, collections::BTreeMap};

use log::debug;

use chartroom_core::{
    diagram::{Diagram, DiagramSummary},
    identifier::DiagramId,
};

use crate::{
    error::StoreError,
    store::{DiagramStore, sort_summaries},
};

/// In-process diagram store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    diagrams: RefCell<BTreeMap<DiagramId, Diagram>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `diagrams`; later duplicates replace earlier ones.
    pub fn with_diagrams(diagrams: impl IntoIterator<Item = Diagram>) -> Self {
        let diagrams = diagrams
            .into_iter()
            .map(|diagram| (diagram.id.clone(), diagram))
            .collect();
        Self {
            diagrams: RefCell::new(diagrams),
        }
    }

    pub fn len(&self) -> usize {
        self.diagrams.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.borrow().is_empty()
    }

    pub fn contains(&self, id: &DiagramId) -> bool {
        self.diagrams.borrow().contains_key(id)
    }
}

impl DiagramStore for MemoryStore {
    async fn load(&self, id: &DiagramId) -> Result<Option<Diagram>, StoreError> {
        Ok(self.diagrams.borrow().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<DiagramSummary>, StoreError> {
        let mut summaries: Vec<_> = self.diagrams.borrow().values().map(Diagram::summary).collect();
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    async fn add(&self, diagram: &Diagram) -> Result<(), StoreError> {
        let mut diagrams = self.diagrams.borrow_mut();
        if diagrams.contains_key(&diagram.id) {
            return Err(StoreError::Conflict(diagram.id.clone()));
        }
        debug!(diagram_id = diagram.id.as_str(); "Adding diagram to memory store");
        diagrams.insert(diagram.id.clone(), diagram.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chartroom_core::diagram::DatabaseType;

    use super::*;

    fn diagram(id: &str, updated_at: u64) -> Diagram {
        let mut diagram = Diagram::new(DiagramId::new(id).unwrap(), id, DatabaseType::Sqlite);
        diagram.updated_at = updated_at;
        diagram
    }

    #[tokio::test]
    async fn test_add_then_load() {
        let store = MemoryStore::new();
        let d1 = diagram("d1", 1);

        store.add(&d1).await.unwrap();
        assert_eq!(store.load(&d1.id).await.unwrap(), Some(d1));
        assert_eq!(
            store.load(&DiagramId::new("nope").unwrap()).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_add_conflict() {
        let store = MemoryStore::with_diagrams([diagram("d1", 1)]);
        let err = store.add(&diagram("d1", 2)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(id) if id == "d1"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let store =
            MemoryStore::with_diagrams([diagram("old", 1), diagram("new", 9), diagram("mid", 5)]);
        let ids: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }
}
