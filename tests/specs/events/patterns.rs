//! Pattern language specs
//!
//! Patterns are regular expressions searched anywhere in the event name,
//! optionally wrapped in delimiters with trailing flags.

use crate::prelude::*;
use crate::prelude::assert_eq;
use tavern_core::events::matches;

#[test]
fn patterns_are_unanchored_unless_anchored_explicitly() {
    assert!(matches("/start/", "evt.start.now").unwrap());
    assert!(!matches("/^start/", "evt.start").unwrap());
    assert!(matches("/^evt\\.start$/", "evt.start").unwrap());
    assert!(!matches("/^evt\\.start$/", "evt.started").unwrap());
}

#[test]
fn delimiters_and_flags() {
    assert!(matches("#^Player\\.#i", "player.join").unwrap());
    assert!(matches("~a/b~", "a/b").unwrap());
    assert!(matches("/a\\/b/", "a/b").unwrap());
    assert!(matches("a.*", "abc").unwrap());
}

#[test]
fn invalid_patterns_are_errors_not_misses() {
    let err = matches("/(unclosed/", "anything").unwrap_err();

    assert_eq!(err.pattern.as_str(), "/(unclosed/");
    assert!(matches("/a/q", "a").is_err());
    assert!(matches("//", "a").is_err());
}

#[test]
fn module_with_case_insensitive_pattern_routes_events() {
    let project = Project::empty();
    project.module("acme/chat", json!([{ "pattern": "/^chat\\.say$/i", "class": "Say" }]));
    let calls = Calls::new();
    let handlers = HandlerRegistry::new();
    handlers.register("Say", calls.handler("Say"));
    let host = project.start_with(handlers);
    host.install_discovered().unwrap();

    host.dispatch("CHAT.Say", EventContext::new()).unwrap();

    assert_eq!(calls.get(), vec!["Say:CHAT.Say".to_string()]);
}
