//! Editor session hosting a [`DiagramResolver`].
//!
//! The session owns the inputs the resolver reacts to (configuration, the
//! route's diagram id and the open diagram) and re-runs it whenever one of
//! them changes. Redirects issued by the resolver are applied to the route,
//! which in turn triggers the next run.

use std::cell::RefCell;

use log::{debug, info};

use chartroom_core::{diagram::Diagram, identifier::DiagramId, route::DiagramRoute};

use crate::{
    bootstrap::BootstrapSource,
    config::AppConfig,
    error::ChartroomError,
    resolver::{Collaborators, DiagramResolver, Resolution, Signals},
    store::DiagramStore,
    ui::{DialogPresenter, HistoryStack, LoadingIndicator, Navigator},
};

/// Redirects followed by one [`EditorSession::settle`] before giving up.
pub const MAX_REDIRECTS: usize = 8;

/// Navigation target recording the latest requested route.
#[derive(Debug, Default)]
struct Router {
    pending: RefCell<Option<DiagramRoute>>,
}

impl Router {
    fn take(&self) -> Option<DiagramRoute> {
        self.pending.borrow_mut().take()
    }
}

impl Navigator for Router {
    fn navigate(&self, route: &DiagramRoute) {
        debug!(route = route.to_string(); "Navigation requested");
        self.pending.replace(Some(route.clone()));
    }
}

/// The values whose change triggers a resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Trigger {
    requested: Option<DiagramId>,
    config_loaded: bool,
    current: Option<DiagramId>,
}

/// An editor session: one open diagram, its route and its surfaces.
///
/// # Examples
///
/// ```
/// # use chartroom::{
/// #     bootstrap::NoBootstrap, config::AppConfig, history::History, session::EditorSession,
/// #     store::MemoryStore, ui::{Dialog, DialogPresenter, HistoryStack, LoadingIndicator},
/// # };
/// # #[derive(Default)]
/// # struct Ui(History<()>);
/// # impl DialogPresenter for Ui { fn open(&self, _: Dialog) {} }
/// # impl LoadingIndicator for Ui { fn show(&self) {} fn hide(&self) {} }
/// # impl HistoryStack for Ui {
/// #     fn reset_redo(&self) { self.0.reset_redo() }
/// #     fn reset_undo(&self) { self.0.reset_undo() }
/// # }
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let mut session = EditorSession::new(MemoryStore::new(), NoBootstrap, Ui::default());
/// session.set_config(AppConfig::default());
///
/// let trail = session.settle().await.unwrap();
/// assert_eq!(trail[0].dialog(), Some(Dialog::CreateDiagram));
/// # });
/// ```
pub struct EditorSession<S, B, U> {
    store: S,
    bootstrap: B,
    ui: U,
    resolver: DiagramResolver,
    router: Router,
    config: Option<AppConfig>,
    route: Option<DiagramId>,
    current: Option<Diagram>,
    last_trigger: Option<Trigger>,
}

impl<S, B, U> EditorSession<S, B, U>
where
    S: DiagramStore,
    B: BootstrapSource,
    U: DialogPresenter + LoadingIndicator + HistoryStack,
{
    /// Create a session with no configuration loaded and no route.
    pub fn new(store: S, bootstrap: B, ui: U) -> Self {
        Self {
            store,
            bootstrap,
            ui,
            resolver: DiagramResolver::new(),
            router: Router::default(),
            config: None,
            route: None,
            current: None,
            last_trigger: None,
        }
    }

    pub fn set_config(&mut self, config: AppConfig) {
        self.config = Some(config);
    }

    /// Change the route's diagram id, `None` being the bare editor route.
    pub fn navigate_to(&mut self, id: Option<DiagramId>) {
        self.route = id;
    }

    pub fn route(&self) -> Option<&DiagramId> {
        self.route.as_ref()
    }

    /// The route as a path, `/` when no diagram is addressed.
    pub fn route_path(&self) -> String {
        match &self.route {
            Some(id) => DiagramRoute::new(id.clone()).to_string(),
            None => "/".to_string(),
        }
    }

    /// The diagram currently open in the editor.
    pub fn current(&self) -> Option<&Diagram> {
        self.current.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn resolver(&self) -> &DiagramResolver {
        &self.resolver
    }

    /// Run the resolver until the trigger inputs stop changing.
    ///
    /// Returns every run that was not skipped, in order. A loaded diagram
    /// becomes the current diagram; a redirect becomes the new route.
    ///
    /// # Errors
    ///
    /// Returns [`ChartroomError::RedirectLoop`] if more than
    /// [`MAX_REDIRECTS`] redirects are issued.
    pub async fn settle(&mut self) -> Result<Vec<Resolution>, ChartroomError> {
        let mut trail = Vec::new();
        let mut redirects = 0;

        loop {
            let trigger = self.trigger();
            if self.last_trigger.as_ref() == Some(&trigger) {
                break;
            }
            self.last_trigger = Some(trigger);

            let resolution = {
                let env = Collaborators {
                    store: &self.store,
                    bootstrap: &self.bootstrap,
                    dialogs: &self.ui,
                    navigator: &self.router,
                    loader: &self.ui,
                    history: &self.ui,
                };
                let signals = Signals {
                    requested: self.route.as_ref(),
                    config: self.config.as_ref(),
                    current: self.current.as_ref().map(|diagram| &diagram.id),
                };
                self.resolver.resolve(&env, signals).await
            };

            if let Resolution::Loaded(diagram) = &resolution {
                info!(diagram_id = diagram.id.as_str(); "Diagram opened");
                self.current = Some(diagram.clone());
            }

            if let Some(route) = self.router.take() {
                redirects += 1;
                if redirects > MAX_REDIRECTS {
                    return Err(ChartroomError::RedirectLoop(MAX_REDIRECTS));
                }
                self.route = Some(route.into_id());
            }

            if !resolution.is_skipped() {
                trail.push(resolution);
            }
        }

        Ok(trail)
    }

    fn trigger(&self) -> Trigger {
        Trigger {
            requested: self.route.clone(),
            config_loaded: self.config.is_some(),
            current: self.current.as_ref().map(|diagram| diagram.id.clone()),
        }
    }
}
