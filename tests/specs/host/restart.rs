//! Host restart specs
//!
//! Module records survive restarts in the write-ahead log; subscriptions
//! are rebuilt from each module's current metadata at startup.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn modules_and_subscriptions_survive_restart() {
    let project = Project::empty();
    project
        .module("acme/a", json!([{ "pattern": "/^a$/", "class": "A" }]))
        .module("acme/b", json!([{ "pattern": "/^b$/", "class": "B" }]));
    let host = project.start();
    host.install_discovered().unwrap();
    let created: Vec<_> = host.modules().modules().unwrap();
    host.shutdown();

    let host = project.start();

    assert_eq!(host.modules().modules().unwrap(), created);
    assert_eq!(
        subscriptions(&host),
        vec![sub("/^a$/", "A", "acme/a"), sub("/^b$/", "B", "acme/b")]
    );
}

#[test]
fn unregistered_modules_stay_gone_after_restart() {
    let project = Project::empty();
    project
        .module("acme/a", json!([{ "pattern": "/^a$/", "class": "A" }]))
        .module("acme/b", json!([{ "pattern": "/^b$/", "class": "B" }]));
    let host = project.start();
    host.install_discovered().unwrap();
    host.modules()
        .unregister("acme/a", &descriptor(json!([{ "pattern": "/^a$/", "class": "A" }])))
        .unwrap();
    host.shutdown();

    let host = project.start();

    assert_eq!(libraries(&host), vec!["acme/b".to_string()]);
    assert_eq!(subscriptions(&host), vec![sub("/^b$/", "B", "acme/b")]);
}

#[test]
fn restart_picks_up_changed_metadata() {
    let project = Project::empty();
    project.module("acme/a", json!([{ "pattern": "/^a$/", "class": "A" }]));
    let host = project.start();
    host.install_discovered().unwrap();
    host.shutdown();

    project.module(
        "acme/a",
        json!([
            { "pattern": "/^a$/", "class": "A" },
            { "pattern": "/^a2$/", "class": "A2" },
        ]),
    );
    let host = project.start();

    assert_eq!(
        subscriptions(&host),
        vec![sub("/^a$/", "A", "acme/a"), sub("/^a2$/", "A2", "acme/a")]
    );
}

#[test]
fn removed_package_keeps_record_without_subscriptions() {
    let project = Project::empty();
    project.module("acme/a", json!([{ "pattern": "/^a$/", "class": "A" }]));
    let host = project.start();
    host.install_discovered().unwrap();
    host.shutdown();

    project.remove_package("acme/a");
    let host = project.start();

    assert_eq!(libraries(&host), vec!["acme/a".to_string()]);
    assert!(subscriptions(&host).is_empty());
}

#[test]
fn torn_log_tail_is_discarded() {
    let project = Project::empty();
    project.module("acme/a", json!([]));
    let host = project.start();
    host.install_discovered().unwrap();
    let wal = host.config().wal_path();
    host.shutdown();

    let mut content = std::fs::read_to_string(&wal).unwrap();
    content.push_str("{\"seq\":2,\"op\":{\"ModuleCre");
    std::fs::write(&wal, content).unwrap();

    let host = project.start();
    assert_eq!(libraries(&host), vec!["acme/a".to_string()]);

    host.modules().register("acme/b", &descriptor(json!([]))).unwrap();
    host.shutdown();
    let host = project.start();
    assert_eq!(
        libraries(&host),
        vec!["acme/a".to_string(), "acme/b".to_string()]
    );
}

#[test]
fn only_one_host_per_state_dir() {
    let project = Project::empty();
    let _running = project.start();

    let err = Host::startup(&project.config(), HandlerRegistry::new())
        .err()
        .unwrap();

    assert!(matches!(err, HostError::LockFailed(_)));
}

#[test]
fn state_dir_is_configurable() {
    let project = Project::empty();
    project
        .file("tavern.toml", "state_dir = \"var/tavern\"\n")
        .module("acme/a", json!([]));
    let host = project.start();
    host.install_discovered().unwrap();

    assert!(project.root().join("var/tavern/modules.wal").is_file());
    assert!(project.root().join("var/tavern/tavernd.lock").is_file());
}
