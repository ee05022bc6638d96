//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use reforge_foundation::{ComponentTag, Error, ErrorContext, ErrorKind, ObjectId, Type};

// =============================================================================
// Migration Errors
// =============================================================================

#[test]
fn error_handle_resolution() {
    let err = Error::handle_resolution("template props/door.tpl");
    assert!(matches!(err.kind, ErrorKind::HandleResolution(_)));
    assert!(err.to_string().contains("props/door.tpl"));
}

#[test]
fn error_handler_not_found() {
    let err = Error::handler_not_found(ComponentTag::new("OldSlider"));
    match &err.kind {
        ErrorKind::HandlerNotFound(tag) => assert_eq!(tag.as_str(), "OldSlider"),
        other => panic!("unexpected kind: {other:?}"),
    }
    assert_eq!(err.to_string(), "no migration handler registered for OldSlider");
}

#[test]
fn error_persistence() {
    let err = Error::persistence("aggregate level.agg", "disk full");
    assert!(err.is_persistence());
    assert_eq!(err.to_string(), "failed to save aggregate level.agg: disk full");
}

#[test]
fn only_persistence_is_persistence() {
    assert!(!Error::handle_resolution("x").is_persistence());
    assert!(!Error::handler_not_found(ComponentTag::new("X")).is_persistence());
}

// =============================================================================
// Store Errors
// =============================================================================

#[test]
fn error_stale_object() {
    let err = Error::stale_object(ObjectId::new(5, 2));
    assert!(matches!(err.kind, ErrorKind::StaleObject(_)));
    assert!(err.to_string().contains("5v2"));
}

#[test]
fn error_component_not_found() {
    let err = Error::component_not_found("instance #3", ComponentTag::new("OldManip"));
    let msg = err.to_string();
    assert!(msg.contains("OldManip"));
    assert!(msg.contains("instance #3"));
}

#[test]
fn error_component_exists() {
    let err = Error::component_exists("instance #3", ComponentTag::new("NewManip"));
    assert!(matches!(err.kind, ErrorKind::ComponentExists { .. }));
    assert!(err.to_string().contains("NewManip"));
}

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch(Type::Float, Type::String);
    assert_eq!(err.to_string(), "type mismatch: expected float, got string");
}

#[test]
fn error_invalid_value() {
    let err = Error::invalid_value("OldManip.smoothingAmountOneHandManip", "amount 2 is outside 0..=1");
    match &err.kind {
        ErrorKind::InvalidValue { field, message } => {
            assert_eq!(field, "OldManip.smoothingAmountOneHandManip");
            assert!(message.contains("outside"));
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn error_without_context() {
    let err = Error::handle_resolution("x");
    assert!(err.context.is_none());
}

#[test]
fn error_with_context() {
    let err = Error::handler_not_found(ComponentTag::new("OldManip")).with_context(
        ErrorContext::new()
            .with_source("template door.tpl #0")
            .with_frame("migrate OldManip"),
    );

    let context = err.context.as_ref().unwrap();
    assert_eq!(context.source.as_deref(), Some("template door.tpl #0"));
    assert_eq!(context.stack, vec!["migrate OldManip".to_string()]);

    let rendered = context.to_string();
    assert!(rendered.contains("at template door.tpl #0"));
    assert!(rendered.contains("in migrate OldManip"));
}
