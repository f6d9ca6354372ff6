mod common;

use proptest::prelude::*;
use tempfile::tempdir;

use chartroom::{
    ResolveError,
    bootstrap::{FileBootstrap, NoBootstrap, StaticBootstrap},
    config::AppConfig,
    resolver::{Collaborators, DiagramResolver, LoadTarget, Resolution, SkipReason, Signals},
    ui::Dialog,
};

use common::{Event, Recorder, SEED_SCHEMA, TestStore, diagram, id};

const OPEN_LOCKED: Dialog = Dialog::OpenDiagram { can_close: false };

#[tokio::test]
async fn test_create_dialog_when_nothing_exists() {
    let store = TestStore::default();
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    assert!(matches!(
        resolution,
        Resolution::DialogRequested { dialog: Dialog::CreateDiagram, cause: Some(ResolveError::FetchUnavailable(None)) }
    ));
    assert_eq!(ui.events(), vec![Event::Dialog(Dialog::CreateDiagram)]);
    assert_eq!(store.adds.get(), 0);
}

#[tokio::test]
async fn test_requested_diagram_is_published() {
    let store = TestStore::with_diagrams([diagram("d1"), diagram("d2")]);
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);
    let requested = id("d1");

    let resolution = resolver
        .resolve(&env, Signals { requested: Some(&requested), config: Some(&config), current: None })
        .await;

    let Resolution::Loaded(loaded) = resolution else {
        panic!("expected a loaded diagram, got {resolution:?}");
    };
    assert_eq!(loaded.id, requested);
    assert_eq!(resolver.resolved().map(|d| d.id), Some(requested.clone()));
    assert_eq!(resolver.in_flight(), Some(LoadTarget::Requested(requested)));
    assert_eq!(
        ui.events(),
        vec![Event::Show, Event::ResetRedo, Event::ResetUndo, Event::Hide]
    );
}

#[tokio::test]
async fn test_missing_requested_diagram_opens_locked_dialog() {
    let store = TestStore::with_diagrams([diagram("d1")]);
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let bootstrap = StaticBootstrap::new(SEED_SCHEMA);
    let env = Collaborators::new(&store, &bootstrap, &ui);
    let requested = id("abc123");

    let resolution = resolver
        .resolve(&env, Signals { requested: Some(&requested), config: Some(&config), current: None })
        .await;

    match resolution {
        Resolution::DialogRequested {
            dialog,
            cause: Some(ResolveError::NotFound { id, source: None }),
        } => {
            assert_eq!(dialog, OPEN_LOCKED);
            assert_eq!(id, requested);
        }
        other => panic!("unexpected resolution {other:?}"),
    }
    assert_eq!(
        ui.events(),
        vec![
            Event::Show,
            Event::ResetRedo,
            Event::ResetUndo,
            Event::Dialog(OPEN_LOCKED),
            Event::Hide,
        ]
    );
    assert!(ui.navigations().is_empty());
    assert!(resolver.resolved().is_none());
    assert_eq!(store.adds.get(), 0);
}

#[tokio::test]
async fn test_load_failure_is_treated_as_missing() {
    let store = TestStore::with_diagrams([diagram("d1")]);
    store.fail_load.set(true);
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);
    let requested = id("d1");

    let resolution = resolver
        .resolve(&env, Signals { requested: Some(&requested), config: Some(&config), current: None })
        .await;

    assert!(matches!(
        resolution,
        Resolution::DialogRequested { dialog: OPEN_LOCKED, cause: Some(ResolveError::NotFound { source: Some(_), .. }) }
    ));
    assert!(!ui.loader_visible());
}

#[tokio::test]
async fn test_default_diagram_redirect() {
    let store = TestStore::with_diagrams([diagram("d1"), diagram("d2")]);
    let ui = Recorder::default();
    let config = AppConfig::default().with_default_diagram(id("d1"));
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    let Resolution::Redirected(route) = resolution else {
        panic!("expected a redirect, got {resolution:?}");
    };
    assert_eq!(route.to_string(), "/diagrams/d1");
    assert_eq!(ui.events(), vec![Event::Navigate("/diagrams/d1".to_string())]);
    assert_eq!(store.lists.get(), 0);
    assert!(resolver.resolved().is_none());
}

#[tokio::test]
async fn test_missing_default_falls_back_to_open_dialog() {
    let store = TestStore::with_diagrams([diagram("other")]);
    let ui = Recorder::default();
    let config = AppConfig::default().with_default_diagram(id("gone"));
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    assert!(matches!(resolution, Resolution::DialogRequested { dialog: OPEN_LOCKED, cause: None }));
    assert_eq!(ui.events(), vec![Event::Dialog(OPEN_LOCKED)]);
    assert_eq!(store.loads.get(), 1);
    assert_eq!(store.lists.get(), 1);
}

#[tokio::test]
async fn test_existing_diagrams_never_bootstrap() {
    let store = TestStore::with_diagrams([diagram("d1")]);
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let bootstrap = StaticBootstrap::new(SEED_SCHEMA);
    let env = Collaborators::new(&store, &bootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    assert_eq!(resolution.dialog(), Some(OPEN_LOCKED));
    assert_eq!(store.adds.get(), 0);
    assert!(ui.navigations().is_empty());
}

#[tokio::test]
async fn test_bootstrap_seeds_and_redirects() {
    let store = TestStore::default();
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let bootstrap = StaticBootstrap::new(SEED_SCHEMA);
    let env = Collaborators::new(&store, &bootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    assert!(matches!(&resolution, Resolution::Redirected(route) if route.id() == "seed1"));
    assert_eq!(store.adds.get(), 1);
    assert!(store.contains(&id("seed1")));
    assert_eq!(ui.events(), vec![Event::Navigate("/diagrams/seed1".to_string())]);
}

#[tokio::test]
async fn test_bootstrap_from_file() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("bs-schema.json"), SEED_SCHEMA).unwrap();

    let store = TestStore::default();
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let bootstrap = FileBootstrap::in_dir(dir.path());
    let env = Collaborators::new(&store, &bootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    assert!(matches!(resolution, Resolution::Redirected(_)));
    assert_eq!(ui.navigations(), vec!["/diagrams/seed1".to_string()]);
}

#[tokio::test]
async fn test_unreadable_bootstrap_opens_create_dialog() {
    let dir = tempdir().unwrap();
    let store = TestStore::default();
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    // A directory cannot be read as a document.
    let bootstrap = FileBootstrap::new(dir.path());
    let env = Collaborators::new(&store, &bootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    assert!(matches!(
        resolution,
        Resolution::DialogRequested { dialog: Dialog::CreateDiagram, cause: Some(ResolveError::FetchUnavailable(Some(_))) }
    ));
    assert_eq!(ui.dialogs(), vec![Dialog::CreateDiagram]);
}

#[tokio::test]
async fn test_malformed_bootstrap_opens_create_dialog() {
    let store = TestStore::default();
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let bootstrap = StaticBootstrap::new("{ not json");
    let env = Collaborators::new(&store, &bootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    assert!(matches!(
        resolution,
        Resolution::DialogRequested { dialog: Dialog::CreateDiagram, cause: Some(ResolveError::Parse(_)) }
    ));
    assert_eq!(store.adds.get(), 0);
    assert!(ui.navigations().is_empty());
}

#[tokio::test]
async fn test_persist_failure_opens_create_dialog() {
    let store = TestStore::default();
    store.fail_add.set(true);
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let bootstrap = StaticBootstrap::new(SEED_SCHEMA);
    let env = Collaborators::new(&store, &bootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    assert!(matches!(
        resolution,
        Resolution::DialogRequested { dialog: Dialog::CreateDiagram, cause: Some(ResolveError::Persist(_)) }
    ));
    assert_eq!(store.adds.get(), 1);
    assert!(ui.navigations().is_empty());
}

#[tokio::test]
async fn test_list_failure_opens_locked_dialog() {
    let store = TestStore::default();
    store.fail_list.set(true);
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let bootstrap = StaticBootstrap::new(SEED_SCHEMA);
    let env = Collaborators::new(&store, &bootstrap, &ui);

    let resolution = resolver
        .resolve(&env, Signals { config: Some(&config), ..Signals::default() })
        .await;

    assert!(matches!(
        resolution,
        Resolution::DialogRequested { dialog: OPEN_LOCKED, cause: Some(ResolveError::List(_)) }
    ));
    assert_eq!(store.adds.get(), 0);
}

#[tokio::test]
async fn test_waits_for_configuration() {
    let store = TestStore::with_diagrams([diagram("d1")]);
    let ui = Recorder::default();
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);
    let requested = id("d1");

    let resolution = resolver
        .resolve(&env, Signals { requested: Some(&requested), ..Signals::default() })
        .await;

    assert!(matches!(resolution, Resolution::Skipped(SkipReason::ConfigNotLoaded)));
    assert_eq!(store.calls(), 0);
    assert!(ui.events().is_empty());
    assert!(resolver.in_flight().is_none());
}

#[tokio::test]
async fn test_open_diagram_is_not_reloaded() {
    let store = TestStore::with_diagrams([diagram("d1")]);
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);
    let requested = id("d1");
    let signals = Signals { requested: Some(&requested), config: Some(&config), current: Some(&requested) };

    for _ in 0..2 {
        let resolution = resolver.resolve(&env, signals).await;
        assert!(matches!(resolution, Resolution::Skipped(SkipReason::AlreadyLoaded)));
    }
    assert_eq!(store.calls(), 0);
    assert!(ui.events().is_empty());
}

#[tokio::test]
async fn test_repeated_trigger_for_same_target_is_ignored() {
    let store = TestStore::default();
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);
    let requested = id("abc123");
    let signals = Signals { requested: Some(&requested), config: Some(&config), current: None };

    assert_eq!(resolver.resolve(&env, signals).await.dialog(), Some(OPEN_LOCKED));
    let again = resolver.resolve(&env, signals).await;

    assert!(matches!(again, Resolution::Skipped(SkipReason::InFlight)));
    assert_eq!(store.loads.get(), 1);
    assert_eq!(ui.dialogs(), vec![OPEN_LOCKED]);
}

#[tokio::test]
async fn test_new_target_runs_after_previous() {
    let store = TestStore::with_diagrams([diagram("d1"), diagram("d2")]);
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);
    let (first, second) = (id("d1"), id("d2"));

    let resolution = resolver
        .resolve(&env, Signals { requested: Some(&first), config: Some(&config), current: None })
        .await;
    assert!(matches!(resolution, Resolution::Loaded(_)));

    let resolution = resolver
        .resolve(&env, Signals { requested: Some(&second), config: Some(&config), current: Some(&first) })
        .await;
    assert!(matches!(resolution, Resolution::Loaded(d) if d.id == second));
    assert_eq!(store.loads.get(), 2);
    assert_eq!(ui.count(&Event::ResetUndo), 2);
}

#[tokio::test]
async fn test_reentrant_trigger_while_loading() {
    let requested = id("slow");
    let store = TestStore::with_diagrams([diagram("slow")]).gated(requested.clone());
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);
    let signals = Signals { requested: Some(&requested), config: Some(&config), current: None };

    let (first, second) = tokio::join!(resolver.resolve(&env, signals), async {
        let second = resolver.resolve(&env, signals).await;
        store.release();
        second
    });

    assert!(matches!(first, Resolution::Loaded(_)));
    assert!(matches!(second, Resolution::Skipped(SkipReason::InFlight)));
    assert_eq!(store.loads.get(), 1);
    assert_eq!(ui.count(&Event::Show), 1);
    assert!(!ui.loader_visible());
}

#[tokio::test]
async fn test_stale_load_is_discarded() {
    let slow = id("slow");
    let fast = id("fast");
    let store = TestStore::with_diagrams([diagram("slow"), diagram("fast")]).gated(slow.clone());
    let ui = Recorder::default();
    let config = AppConfig::default();
    let resolver = DiagramResolver::new();
    let env = Collaborators::new(&store, &NoBootstrap, &ui);

    let (first, second) = tokio::join!(
        resolver.resolve(&env, Signals { requested: Some(&slow), config: Some(&config), current: None }),
        async {
            let second = resolver
                .resolve(&env, Signals { requested: Some(&fast), config: Some(&config), current: None })
                .await;
            store.release();
            second
        }
    );

    assert!(matches!(first, Resolution::Superseded));
    assert!(matches!(second, Resolution::Loaded(d) if d.id == fast));
    assert_eq!(resolver.resolved().map(|d| d.id), Some(fast));
    assert_eq!(ui.count(&Event::Show), 2);
    assert_eq!(ui.count(&Event::Hide), 1);
    assert!(!ui.loader_visible());
}

proptest! {
    #[test]
    fn test_any_stored_diagram_loads(name in "[a-z0-9_-]{1,24}") {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let requested = id(&name);
        let store = TestStore::with_diagrams([diagram(&name)]);
        let ui = Recorder::default();
        let config = AppConfig::default();
        let resolver = DiagramResolver::new();
        let env = Collaborators::new(&store, &NoBootstrap, &ui);

        let resolution = runtime.block_on(resolver.resolve(
            &env,
            Signals { requested: Some(&requested), config: Some(&config), current: None },
        ));

        prop_assert!(matches!(resolution, Resolution::Loaded(d) if d.id == requested));
        prop_assert_eq!(ui.count(&Event::Show), 1);
        prop_assert_eq!(ui.count(&Event::Hide), 1);
        prop_assert!(ui.dialogs().is_empty());
    }
}
