//! Module metadata specs
//!
//! Installed packages declare subscriptions in their manifest's `extra`
//! section; the host installs every module package it discovers.

use crate::prelude::*;
use crate::prelude::assert_eq;
use tavern_core::PackageDiscovery;

#[test]
fn install_discovered_registers_module_packages_in_name_order() {
    let project = Project::empty();
    project
        .module("zeta/weather", json!([{ "pattern": "/^tick$/", "class": "Rain" }]))
        .module("acme/combat", json!([{ "pattern": "/^tick$/", "class": "Regen" }]))
        .library("acme/utils");
    let host = project.start();

    let installed: Vec<_> = host
        .install_discovered()
        .unwrap()
        .into_iter()
        .map(|m| m.library)
        .collect();

    assert_eq!(
        installed,
        vec!["acme/combat".to_string(), "zeta/weather".to_string()]
    );
    assert_eq!(
        subscriptions(&host),
        vec![
            sub("/^tick$/", "Regen", "acme/combat"),
            sub("/^tick$/", "Rain", "zeta/weather"),
        ]
    );
}

#[test]
fn install_discovered_is_idempotent() {
    let project = Project::empty();
    project.module("acme/combat", json!([{ "pattern": "/^tick$/", "class": "Regen" }]));
    let host = project.start();
    host.install_discovered().unwrap();

    let again = host.install_discovered().unwrap();

    assert!(again.is_empty());
    assert_eq!(subscriptions(&host).len(), 1);
}

#[test]
fn malformed_declarations_are_skipped() {
    let project = Project::empty();
    project.module(
        "acme/sloppy",
        json!([
            { "pattern": "/^a$/", "class": "A" },
            "not an object",
            { "pattern": 42, "class": "Numeric" },
            { "class": "NoPattern" },
            { "pattern": "/^b$/", "handler": "B", "priority": 3 },
        ]),
    );
    let host = project.start();

    host.install_discovered().unwrap();

    assert_eq!(
        subscriptions(&host),
        vec![
            sub("/^a$/", "A", "acme/sloppy"),
            sub("/^b$/", "B", "acme/sloppy"),
        ]
    );
}

#[test]
fn module_without_subscriptions_is_still_registered() {
    let project = Project::empty();
    project.package_json(
        "acme/quiet",
        json!({ "name": "acme/quiet", "type": "tavern-module" }),
    );
    let host = project.start();

    host.install_discovered().unwrap();

    assert_eq!(libraries(&host), vec!["acme/quiet".to_string()]);
    assert!(subscriptions(&host).is_empty());
}

#[test]
fn configured_module_type_selects_packages() {
    let project = Project::empty();
    project
        .file("tavern.toml", "module_type = \"game-plugin\"\n")
        .module("acme/default-type", json!([]))
        .package_json(
            "acme/plugin",
            json!({ "name": "acme/plugin", "type": "game-plugin" }),
        );
    let host = project.start();

    host.install_discovered().unwrap();

    assert_eq!(libraries(&host), vec!["acme/plugin".to_string()]);
}

#[test]
fn unregister_with_current_metadata() {
    let project = Project::empty();
    project.module(
        "acme/combat",
        json!([
            { "pattern": "/^hit$/", "class": "Hit" },
            { "pattern": "/^miss$/", "class": "Miss" },
        ]),
    );
    let host = project.start();
    host.install_discovered().unwrap();

    let package = tavern_adapters::ManifestDiscovery::new(project.config().vendor_dir)
        .package("acme/combat")
        .unwrap();
    host.modules()
        .unregister("acme/combat", &package.descriptor)
        .unwrap();

    assert!(subscriptions(&host).is_empty());
    assert!(libraries(&host).is_empty());
}
