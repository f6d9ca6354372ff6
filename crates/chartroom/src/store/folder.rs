//! Folder-backed diagram store.
//!
//! Layout: `<root>/<diagram-id>.json`, one pretty-printed diagram per file.
//! Writes go through a temporary file in the same folder and are moved into
//! place without overwriting, so a concurrent writer of the same id loses
//! with [`StoreError::Conflict`] instead of clobbering.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use chartroom_core::{
    diagram::{Diagram, DiagramSummary},
    identifier::DiagramId,
};

use crate::{
    error::StoreError,
    store::{DiagramStore, sort_summaries},
};

const DIAGRAM_EXTENSION: &str = "json";

/// Diagram store keeping one JSON file per diagram in a folder.
///
/// The folder is created on first write; a missing folder lists as empty.
#[derive(Debug, Clone)]
pub struct FolderStore {
    root: PathBuf,
}

impl FolderStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn diagram_path(&self, id: &DiagramId) -> PathBuf {
        self.root.join(format!("{id}.{DIAGRAM_EXTENSION}"))
    }

    async fn read_diagram(path: &Path) -> Result<Option<Diagram>, StoreError> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::io(path, err)),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl DiagramStore for FolderStore {
    async fn load(&self, id: &DiagramId) -> Result<Option<Diagram>, StoreError> {
        let path = self.diagram_path(id);
        debug!(path = path.display().to_string(); "Loading diagram file");
        match Self::read_diagram(&path).await? {
            Some(diagram) if diagram.id != *id => Err(StoreError::IdMismatch {
                path,
                expected: id.clone(),
                found: diagram.id,
            }),
            loaded => Ok(loaded),
        }
    }

    async fn list(&self) -> Result<Vec<DiagramSummary>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(root = self.root.display().to_string(); "Store folder does not exist yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::io(&self.root, err)),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| StoreError::io(&self.root, err))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DIAGRAM_EXTENSION) {
                continue;
            }

            let stem = path.file_stem().and_then(|stem| stem.to_str()).map(str::to_owned);
            match Self::read_diagram(&path).await {
                Ok(Some(diagram)) if stem.as_deref() != Some(diagram.id.as_str()) => warn!(
                    path = path.display().to_string(),
                    diagram_id = diagram.id.as_str();
                    "Skipping diagram file named after another diagram"
                ),
                Ok(Some(diagram)) => summaries.push(diagram.summary()),
                Ok(None) => {}
                Err(err) => warn!(path = path.display().to_string(); "Skipping diagram file: {err}"),
            }
        }

        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    async fn add(&self, diagram: &Diagram) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(diagram).map_err(|source| StoreError::Encode {
            id: diagram.id.clone(),
            source,
        })?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| StoreError::io(&self.root, err))?;

        let root = self.root.clone();
        let path = self.diagram_path(&diagram.id);
        let id = diagram.id.clone();
        tokio::task::spawn_blocking(move || write_new_file(&root, &path, &bytes, id))
            .await
            .map_err(|err| StoreError::Task(err.to_string()))??;

        info!(
            diagram_id = diagram.id.as_str(),
            root = self.root.display().to_string();
            "Diagram saved"
        );
        Ok(())
    }
}

fn write_new_file(dir: &Path, path: &Path, bytes: &[u8], id: DiagramId) -> Result<(), StoreError> {
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|err| StoreError::io(dir, err))?;
    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|err| StoreError::io(file.path(), err))?;

    file.persist_noclobber(path).map_err(|err| {
        if err.error.kind() == io::ErrorKind::AlreadyExists {
            StoreError::Conflict(id)
        } else {
            StoreError::io(path, err.error)
        }
    })?;
    Ok(())
}
