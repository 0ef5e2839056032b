//! Module lifecycle specs
//!
//! Register and unregister install and remove a module's subscriptions
//! as a batch, keyed by library.

use crate::prelude::*;
use crate::prelude::assert_eq;
use chrono::Utc;

fn mod_x() -> ModuleDescriptor {
    descriptor(json!([
        { "pattern": "/^evt\\.start$/", "handler": "H1" },
        { "crazy": "bad" },
        { "pattern": "/^evt\\.end$/", "handler": "H2" },
    ]))
}

#[test]
fn register_installs_valid_subscriptions_in_order() {
    let project = Project::empty();
    let host = project.start();
    let before = Utc::now();

    let module = host.modules().register("mod/x", &mod_x()).unwrap();

    assert_eq!(
        subscriptions(&host),
        vec![
            sub("/^evt\\.start$/", "H1", "mod/x"),
            sub("/^evt\\.end$/", "H2", "mod/x"),
        ]
    );
    assert_eq!(libraries(&host), vec!["mod/x".to_string()]);
    let age = Utc::now() - module.created_at;
    assert!(module.created_at >= before);
    assert!(age.num_seconds() < 5);
}

#[test]
fn registered_subscriptions_route_their_events() {
    let project = Project::empty();
    let host = project.start();
    host.modules().register("mod/x", &mod_x()).unwrap();

    let start: Vec<_> = host
        .subscriptions()
        .lookup("evt.start")
        .into_iter()
        .map(|s| s.handler.0)
        .collect();
    let end: Vec<_> = host
        .subscriptions()
        .lookup("evt.end")
        .into_iter()
        .map(|s| s.handler.0)
        .collect();

    assert_eq!(start, vec!["H1".to_string()]);
    assert_eq!(end, vec!["H2".to_string()]);
    assert!(host.subscriptions().lookup("evt.started").is_empty());
}

#[test]
fn unregister_removes_subscriptions_and_module() {
    let project = Project::empty();
    let host = project.start();
    host.modules().register("mod/x", &mod_x()).unwrap();

    host.modules().unregister("mod/x", &mod_x()).unwrap();

    assert!(subscriptions(&host).is_empty());
    assert!(libraries(&host).is_empty());

    let err = host.modules().unregister("mod/x", &mod_x()).unwrap_err();
    assert!(matches!(err, ModuleError::DoesNotExist(ref l) if l == "mod/x"));
}

#[test]
fn register_twice_fails_without_duplicates() {
    let project = Project::empty();
    let host = project.start();
    host.modules().register("mod/x", &mod_x()).unwrap();

    let err = host.modules().register("mod/x", &mod_x()).unwrap_err();

    assert!(matches!(err, ModuleError::AlreadyExists(_)));
    assert_eq!(err.to_string().as_str(), "module already exists: mod/x");
    assert_eq!(subscriptions(&host).len(), 2);
    assert_eq!(libraries(&host), vec!["mod/x".to_string()]);
}

#[test]
fn unregister_unknown_library_mutates_nothing() {
    let project = Project::empty();
    let host = project.start();
    host.modules().register("mod/x", &mod_x()).unwrap();
    let before = subscriptions(&host);

    let err = host.modules().unregister("mod/y", &mod_x()).unwrap_err();

    assert_eq!(err.to_string().as_str(), "module does not exist: mod/y");
    assert_eq!(subscriptions(&host), before);
    assert_eq!(libraries(&host), vec!["mod/x".to_string()]);
}

#[test]
fn round_trip_restores_prior_state() {
    let project = Project::empty();
    let host = project.start();
    host.modules()
        .register("mod/base", &descriptor(json!([{ "pattern": "/^evt/", "handler": "Base" }])))
        .unwrap();
    let subs_before = subscriptions(&host);
    let modules_before = libraries(&host);

    host.modules().register("mod/x", &mod_x()).unwrap();
    host.modules().unregister("mod/x", &mod_x()).unwrap();

    assert_eq!(subscriptions(&host), subs_before);
    assert_eq!(libraries(&host), modules_before);
}

#[test]
fn invalid_pattern_fails_register_with_library() {
    let project = Project::empty();
    let host = project.start();
    let bad = descriptor(json!([
        { "pattern": "/^ok$/", "handler": "H1" },
        { "pattern": "/[unclosed/", "handler": "H2" },
    ]));

    let err = host.modules().register("mod/bad", &bad).unwrap_err();

    assert!(matches!(err, ModuleError::InvalidPattern { .. }));
    assert!(err.to_string().contains("mod/bad"));
    assert!(subscriptions(&host).is_empty());
    assert!(libraries(&host).is_empty());
}

#[test]
fn descriptor_drift_leaves_orphaned_subscriptions() {
    let project = Project::empty();
    let host = project.start();
    host.modules().register("mod/x", &mod_x()).unwrap();
    let drifted = descriptor(json!([{ "pattern": "/^evt\\.start$/", "handler": "H1" }]));

    host.modules().unregister("mod/x", &drifted).unwrap();

    assert!(libraries(&host).is_empty());
    let orphans: Vec<_> = host
        .subscriptions()
        .subscriptions_for("mod/x")
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(orphans, vec!["/^evt\\.end$/ -> H2 (mod/x)".to_string()]);
}

#[test]
fn modules_from_different_libraries_keep_registration_order() {
    let project = Project::empty();
    let host = project.start();
    host.modules()
        .register("mod/b", &descriptor(json!([{ "pattern": "/^evt/", "handler": "B" }])))
        .unwrap();
    host.modules()
        .register("mod/a", &descriptor(json!([{ "pattern": "/^evt/", "handler": "A" }])))
        .unwrap();

    let order: Vec<_> = host
        .subscriptions()
        .lookup("evt.tick")
        .into_iter()
        .map(|s| s.library)
        .collect();

    assert_eq!(order, vec!["mod/b".to_string(), "mod/a".to_string()]);
    assert_eq!(libraries(&host), vec!["mod/b".to_string(), "mod/a".to_string()]);
}
