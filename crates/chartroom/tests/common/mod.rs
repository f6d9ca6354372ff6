//! Test doubles shared by the resolver and session tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use tokio::sync::Notify;

use chartroom::{
    StoreError,
    diagram::{DatabaseType, Diagram, DiagramSummary},
    identifier::DiagramId,
    route::DiagramRoute,
    store::{DiagramStore, MemoryStore},
    ui::{Dialog, DialogPresenter, HistoryStack, LoadingIndicator, Navigator},
};

pub const SEED_SCHEMA: &str = r#"{
    "id": "seed1",
    "name": "Seed",
    "databaseType": "postgresql",
    "tables": [
        {
            "id": "t_users",
            "name": "users",
            "fields": [ { "id": "f_id", "name": "id", "type": { "id": "uuid", "name": "uuid" }, "primaryKey": true } ]
        }
    ]
}"#;

pub fn id(value: &str) -> DiagramId {
    DiagramId::new(value).expect("valid test id")
}

pub fn diagram(value: &str) -> Diagram {
    Diagram::new(id(value), format!("Diagram {value}"), DatabaseType::Generic)
}

/// Everything the resolver asked of the editor, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Dialog(Dialog),
    Navigate(String),
    Show,
    Hide,
    ResetRedo,
    ResetUndo,
}

#[derive(Debug, Default)]
pub struct Recorder {
    events: RefCell<Vec<Event>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn dialogs(&self) -> Vec<Dialog> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Dialog(dialog) => Some(*dialog),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Navigate(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether the loader is visible after replaying show/hide events.
    pub fn loader_visible(&self) -> bool {
        self.events
            .borrow()
            .iter()
            .fold(false, |visible, e| match e {
                Event::Show => true,
                Event::Hide => false,
                _ => visible,
            })
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl DialogPresenter for Recorder {
    fn open(&self, dialog: Dialog) {
        self.push(Event::Dialog(dialog));
    }
}

impl Navigator for Recorder {
    fn navigate(&self, route: &DiagramRoute) {
        self.push(Event::Navigate(route.to_string()));
    }
}

impl LoadingIndicator for Recorder {
    fn show(&self) {
        self.push(Event::Show);
    }

    fn hide(&self) {
        self.push(Event::Hide);
    }
}

impl HistoryStack for Recorder {
    fn reset_redo(&self) {
        self.push(Event::ResetRedo);
    }

    fn reset_undo(&self) {
        self.push(Event::ResetUndo);
    }
}

/// Memory store that counts calls, can fail on demand, and can hold back
/// loads of one diagram until released.
#[derive(Debug, Default)]
pub struct TestStore {
    inner: MemoryStore,
    pub loads: Cell<usize>,
    pub lists: Cell<usize>,
    pub adds: Cell<usize>,
    pub fail_load: Cell<bool>,
    pub fail_list: Cell<bool>,
    pub fail_add: Cell<bool>,
    gate: Option<(DiagramId, Notify)>,
}

impl TestStore {
    pub fn with_diagrams(diagrams: impl IntoIterator<Item = Diagram>) -> Self {
        Self {
            inner: MemoryStore::with_diagrams(diagrams),
            ..Self::default()
        }
    }

    /// Hold loads of `gated` until [`TestStore::release`] is called.
    pub fn gated(mut self, gated: DiagramId) -> Self {
        self.gate = Some((gated, Notify::new()));
        self
    }

    pub fn release(&self) {
        if let Some((_, notify)) = &self.gate {
            notify.notify_one();
        }
    }

    pub fn calls(&self) -> usize {
        self.loads.get() + self.lists.get() + self.adds.get()
    }

    pub fn contains(&self, id: &DiagramId) -> bool {
        self.inner.contains(id)
    }
}

fn injected() -> StoreError {
    StoreError::Task("injected failure".to_string())
}

impl DiagramStore for TestStore {
    async fn load(&self, id: &DiagramId) -> Result<Option<Diagram>, StoreError> {
        self.loads.set(self.loads.get() + 1);
        if let Some((gated, notify)) = &self.gate {
            if gated == id {
                notify.notified().await;
            }
        }
        if self.fail_load.get() {
            return Err(injected());
        }
        self.inner.load(id).await
    }

    async fn list(&self) -> Result<Vec<DiagramSummary>, StoreError> {
        self.lists.set(self.lists.get() + 1);
        if self.fail_list.get() {
            return Err(injected());
        }
        self.inner.list().await
    }

    async fn add(&self, diagram: &Diagram) -> Result<(), StoreError> {
        self.adds.set(self.adds.get() + 1);
        if self.fail_add.get() {
            return Err(injected());
        }
        self.inner.add(diagram).await
    }
}
