//! Deciding which diagram an editor session opens.
//!
//! [`DiagramResolver`] runs once per trigger and ends in exactly one of:
//! a published diagram, a redirect to another diagram route, or a dialog
//! asking the user to open or create a diagram. The procedure:
//!
//! 1. A diagram id was requested: load it behind the loading indicator,
//!    with undo/redo history cleared. A miss opens the non-dismissible
//!    "open diagram" dialog.
//! 2. No id, but a default diagram is configured and exists: redirect to it.
//! 3. Otherwise, if diagrams exist, open the non-dismissible "open diagram"
//!    dialog. If none exist, seed one from the bootstrap schema and redirect
//!    to it, or fall back to the "create diagram" dialog.
//!
//! Failures never escape: they are logged and end in a dialog.
//!
//! # Re-entrancy
//!
//! State lives in cells so that triggers fired while a run is suspended on
//! I/O see it. A trigger for the target already recorded as in flight is
//! ignored. Every run takes a generation number; a run that finishes after
//! a newer one started is [`Resolution::Superseded`] and has no visible
//! effect other than releasing the loading indicator it still owns.

use std::cell::{Cell, RefCell};

use log::{debug, info, trace, warn};

use chartroom_core::{diagram::Diagram, identifier::DiagramId, route::DiagramRoute};
use chartroom_import::diagram_from_json_input;

use crate::{
    bootstrap::BootstrapSource,
    config::AppConfig,
    error::ResolveError,
    store::DiagramStore,
    ui::{Dialog, DialogPresenter, HistoryStack, LoadingIndicator, Navigator},
};

/// What a resolution run is working towards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadTarget {
    Requested(DiagramId),
    /// No diagram id in the route.
    Unspecified,
}

impl From<Option<&DiagramId>> for LoadTarget {
    fn from(requested: Option<&DiagramId>) -> Self {
        match requested {
            Some(id) => LoadTarget::Requested(id.clone()),
            None => LoadTarget::Unspecified,
        }
    }
}

/// Inputs a run is evaluated against.
#[derive(Debug, Clone, Copy, Default)]
pub struct Signals<'a> {
    /// Diagram id from the route, if any.
    pub requested: Option<&'a DiagramId>,
    /// `None` until configuration has loaded.
    pub config: Option<&'a AppConfig>,
    /// Id of the diagram the editor currently shows.
    pub current: Option<&'a DiagramId>,
}

/// Why a trigger did not start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ConfigNotLoaded,
    AlreadyLoaded,
    InFlight,
}

/// Outcome of one trigger.
#[derive(Debug)]
pub enum Resolution {
    Skipped(SkipReason),
    /// The requested diagram was loaded and published.
    Loaded(Diagram),
    Redirected(DiagramRoute),
    /// A dialog was requested; `cause` explains a fallback.
    DialogRequested {
        dialog: Dialog,
        cause: Option<ResolveError>,
    },
    /// A newer run started before this one finished.
    Superseded,
}

impl Resolution {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Resolution::Skipped(_))
    }

    /// The dialog requested by this run, if any.
    pub fn dialog(&self) -> Option<Dialog> {
        match self {
            Resolution::DialogRequested { dialog, .. } => Some(*dialog),
            _ => None,
        }
    }
}

/// The collaborators a run talks to.
pub struct Collaborators<'a, S, B> {
    pub store: &'a S,
    pub bootstrap: &'a B,
    pub dialogs: &'a dyn DialogPresenter,
    pub navigator: &'a dyn Navigator,
    pub loader: &'a dyn LoadingIndicator,
    pub history: &'a dyn HistoryStack,
}

impl<'a, S, B> Collaborators<'a, S, B> {
    /// Use one editor surface for dialogs, navigation, loading and history.
    pub fn new<U>(store: &'a S, bootstrap: &'a B, ui: &'a U) -> Self
    where
        U: DialogPresenter + Navigator + LoadingIndicator + HistoryStack,
    {
        Self {
            store,
            bootstrap,
            dialogs: ui,
            navigator: ui,
            loader: ui,
            history: ui,
        }
    }
}

/// Resolves the diagram of one editor session.
///
/// Create one per session; it remembers the in-flight target and the last
/// published diagram for the session's lifetime.
#[derive(Debug, Default)]
pub struct DiagramResolver {
    in_flight: RefCell<Option<LoadTarget>>,
    generation: Cell<u64>,
    loader_owner: Cell<Option<u64>>,
    resolved: RefCell<Option<Diagram>>,
}

impl DiagramResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The diagram published by the latest successful load, if any.
    pub fn resolved(&self) -> Option<Diagram> {
        self.resolved.borrow().clone()
    }

    /// The target recorded by the latest run that was started.
    pub fn in_flight(&self) -> Option<LoadTarget> {
        self.in_flight.borrow().clone()
    }

    /// Run the decision procedure for one trigger.
    pub async fn resolve<S, B>(
        &self,
        env: &Collaborators<'_, S, B>,
        signals: Signals<'_>,
    ) -> Resolution
    where
        S: DiagramStore,
        B: BootstrapSource,
    {
        let Some(config) = signals.config else {
            trace!("Configuration not loaded, deferring resolution");
            return Resolution::Skipped(SkipReason::ConfigNotLoaded);
        };

        if signals.current.is_some() && signals.current == signals.requested {
            trace!("Requested diagram already open");
            return Resolution::Skipped(SkipReason::AlreadyLoaded);
        }

        let target = LoadTarget::from(signals.requested);
        {
            let mut in_flight = self.in_flight.borrow_mut();
            if in_flight.as_ref() == Some(&target) {
                debug!(in_flight:? = target; "Resolution already in flight");
                return Resolution::Skipped(SkipReason::InFlight);
            }
            *in_flight = Some(target);
        }

        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        match signals.requested {
            Some(id) => self.load_requested(env, id, generation).await,
            None => self.resolve_unspecified(env, config, generation).await,
        }
    }

    async fn load_requested<S, B>(
        &self,
        env: &Collaborators<'_, S, B>,
        id: &DiagramId,
        generation: u64,
    ) -> Resolution
    where
        S: DiagramStore,
    {
        info!(diagram_id = id.as_str(), generation; "Loading requested diagram");

        self.resolved.replace(None);
        env.loader.show();
        self.loader_owner.set(Some(generation));
        env.history.reset_redo();
        env.history.reset_undo();

        let loaded = match env.store.load(id).await {
            Ok(Some(diagram)) => Ok(diagram),
            Ok(None) => Err(ResolveError::NotFound {
                id: id.clone(),
                source: None,
            }),
            Err(err) => Err(ResolveError::NotFound {
                id: id.clone(),
                source: Some(err),
            }),
        };

        if self.is_superseded(generation) {
            self.release_loader(env.loader, generation);
            debug!(diagram_id = id.as_str(), generation; "Discarding superseded load");
            return Resolution::Superseded;
        }

        let resolution = match loaded {
            Ok(diagram) => {
                self.resolved.replace(Some(diagram.clone()));
                info!(diagram_id = id.as_str(); "Diagram loaded");
                Resolution::Loaded(diagram)
            }
            Err(err) => {
                warn!(diagram_id = id.as_str(); "{err}");
                self.request_dialog(env.dialogs, Dialog::OpenDiagram { can_close: false }, Some(err))
            }
        };

        self.release_loader(env.loader, generation);
        resolution
    }

    async fn resolve_unspecified<S, B>(
        &self,
        env: &Collaborators<'_, S, B>,
        config: &AppConfig,
        generation: u64,
    ) -> Resolution
    where
        S: DiagramStore,
        B: BootstrapSource,
    {
        if let Some(default_id) = config.default_diagram_id() {
            match env.store.load(default_id).await {
                Ok(Some(_)) => {
                    if self.is_superseded(generation) {
                        return Resolution::Superseded;
                    }
                    info!(diagram_id = default_id.as_str(); "Redirecting to default diagram");
                    return self.redirect(env.navigator, DiagramRoute::new(default_id.clone()));
                }
                Ok(None) => {
                    debug!(diagram_id = default_id.as_str(); "Default diagram does not exist")
                }
                Err(err) => {
                    warn!(diagram_id = default_id.as_str(); "Cannot load default diagram: {err}")
                }
            }
        }

        let listed = env.store.list().await;
        if self.is_superseded(generation) {
            return Resolution::Superseded;
        }

        let diagrams = match listed {
            Ok(diagrams) => diagrams,
            Err(err) => {
                let err = ResolveError::List(err);
                warn!("{err}");
                return self.request_dialog(
                    env.dialogs,
                    Dialog::OpenDiagram { can_close: false },
                    Some(err),
                );
            }
        };

        if !diagrams.is_empty() {
            debug!(count = diagrams.len(); "Diagrams available, asking which to open");
            return self.request_dialog(env.dialogs, Dialog::OpenDiagram { can_close: false }, None);
        }

        let seeded = self.seed_from_bootstrap(env).await;
        if self.is_superseded(generation) {
            return Resolution::Superseded;
        }

        match seeded {
            Ok(route) => self.redirect(env.navigator, route),
            Err(err) => {
                match &err {
                    ResolveError::FetchUnavailable(None) => info!("{err}"),
                    _ => warn!("{err}"),
                }
                self.request_dialog(env.dialogs, Dialog::CreateDiagram, Some(err))
            }
        }
    }

    /// Fetch, parse and persist the bootstrap schema.
    async fn seed_from_bootstrap<S, B>(
        &self,
        env: &Collaborators<'_, S, B>,
    ) -> Result<DiagramRoute, ResolveError>
    where
        S: DiagramStore,
        B: BootstrapSource,
    {
        let document = env
            .bootstrap
            .fetch()
            .await
            .map_err(|err| ResolveError::FetchUnavailable(Some(err)))?
            .ok_or(ResolveError::FetchUnavailable(None))?;

        let diagram = diagram_from_json_input(&document)?;
        env.store.add(&diagram).await.map_err(ResolveError::Persist)?;

        info!(diagram_id = diagram.id.as_str(); "Seeded diagram from bootstrap schema");
        Ok(DiagramRoute::new(diagram.id))
    }

    fn redirect(&self, navigator: &dyn Navigator, route: DiagramRoute) -> Resolution {
        navigator.navigate(&route);
        Resolution::Redirected(route)
    }

    fn request_dialog(
        &self,
        dialogs: &dyn DialogPresenter,
        dialog: Dialog,
        cause: Option<ResolveError>,
    ) -> Resolution {
        dialogs.open(dialog);
        Resolution::DialogRequested { dialog, cause }
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.generation.get() != generation
    }

    /// Hide the loader unless a newer run has taken it over.
    fn release_loader(&self, loader: &dyn LoadingIndicator, generation: u64) {
        if self.loader_owner.get() == Some(generation) {
            self.loader_owner.set(None);
            loader.hide();
        }
    }
}
