//! Chartroom - deciding which schema diagram an editor session opens.
//!
//! An editor page asks for a diagram by route, falls back to a configured
//! default, prompts the user to pick a stored diagram, or seeds the first
//! diagram from a bootstrap schema. The [`resolver`] implements that
//! decision; the remaining modules provide the collaborators it drives.
//!
//! # Example
//!
//! ```
//! use chartroom::{
//!     bootstrap::StaticBootstrap, config::AppConfig, history::History,
//!     resolver::{Collaborators, DiagramResolver, Resolution, Signals},
//!     store::MemoryStore,
//!     ui::{Dialog, DialogPresenter, HistoryStack, LoadingIndicator, Navigator},
//! };
//! use chartroom_core::route::DiagramRoute;
//!
//! #[derive(Default)]
//! struct Editor(History<String>);
//!
//! impl DialogPresenter for Editor { fn open(&self, _dialog: Dialog) {} }
//! impl Navigator for Editor { fn navigate(&self, _route: &DiagramRoute) {} }
//! impl LoadingIndicator for Editor { fn show(&self) {} fn hide(&self) {} }
//! impl HistoryStack for Editor {
//!     fn reset_redo(&self) { self.0.reset_redo() }
//!     fn reset_undo(&self) { self.0.reset_undo() }
//! }
//!
//! let store = MemoryStore::new();
//! let bootstrap = StaticBootstrap::new(r#"{ "id": "seed1", "name": "Seed" }"#);
//! let editor = Editor::default();
//! let config = AppConfig::default();
//!
//! let resolver = DiagramResolver::new();
//! let env = Collaborators::new(&store, &bootstrap, &editor);
//! let signals = Signals { config: Some(&config), ..Signals::default() };
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let resolution = runtime.block_on(resolver.resolve(&env, signals));
//!
//! assert!(matches!(resolution, Resolution::Redirected(route) if route.to_string() == "/diagrams/seed1"));
//! ```

pub mod bootstrap;
pub mod config;
pub mod history;
pub mod resolver;
pub mod session;
pub mod store;
pub mod ui;

mod error;

pub use chartroom_core::{diagram, identifier, route};

pub use error::{BootstrapError, ChartroomError, ResolveError, StoreError};
