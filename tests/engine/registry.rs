//! Integration tests for the handler registry
//!
//! Tests registration, lookup, and the built-in handler set.

use reforge_engine::{HandlerRegistry, MappedHandler, MigrationHandler};
use reforge_foundation::{ComponentTag, ErrorKind};
use reforge_storage::ComponentSchema;

#[test]
fn empty_registry_finds_nothing() {
    let registry = HandlerRegistry::new();
    assert!(registry.is_empty());

    let err = registry.lookup(&ComponentTag::new("OldManip")).unwrap_err();
    match err.kind {
        ErrorKind::HandlerNotFound(tag) => assert_eq!(tag.as_str(), "OldManip"),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn builtin_covers_known_legacy_types() {
    let registry = HandlerRegistry::builtin();
    let tags: Vec<_> = registry
        .legacy_tags()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(tags, vec!["OldBounds", "OldManip"]);

    let handler = registry.lookup(&ComponentTag::new("OldManip")).unwrap();
    assert_eq!(handler.replacement_tag().as_str(), "NewManip");
}

#[test]
fn lookup_is_exact() {
    let registry = HandlerRegistry::builtin();
    assert!(registry.lookup(&ComponentTag::new("oldmanip")).is_err());
    assert!(registry.lookup(&ComponentTag::new("NewManip")).is_err());
}

#[test]
fn register_replaces_previous_handler() {
    let mut registry = HandlerRegistry::builtin();
    let before = registry.len();

    let previous = registry.register(MappedHandler::new(
        "OldManip",
        ComponentSchema::new("NewerManip"),
    ));

    assert_eq!(previous.unwrap().replacement_tag().as_str(), "NewManip");
    assert_eq!(registry.len(), before);
    let handler = registry.lookup(&ComponentTag::new("OldManip")).unwrap();
    assert_eq!(handler.replacement_tag().as_str(), "NewerManip");
}

#[test]
fn register_new_tag() {
    let mut registry = HandlerRegistry::new();
    let previous = registry.register(MappedHandler::new("OldSlider", ComponentSchema::new("NewSlider")));

    assert!(previous.is_none());
    assert!(registry.contains(&ComponentTag::new("OldSlider")));
    assert_eq!(registry.len(), 1);
}
