//! Integration tests for components and schemas
//!
//! Tests component sets, in-place replacement, and schema instantiation.

use reforge_foundation::{ComponentTag, ErrorKind, Fields, ObjectId, Type, Value, fields};
use reforge_storage::{Component, ComponentSchema, ComponentSet, FieldSchema};

fn tag(name: &str) -> ComponentTag {
    ComponentTag::new(name)
}

// =============================================================================
// Component Sets
// =============================================================================

#[test]
fn insert_keeps_order() {
    let mut set = ComponentSet::new();
    set.insert("door", Component::new("Transform")).unwrap();
    set.insert("door", Component::new("OldManip")).unwrap();
    set.insert("door", Component::new("Renderer")).unwrap();

    let tags: Vec<_> = set.tags().map(ComponentTag::as_str).collect();
    assert_eq!(tags, vec!["Transform", "OldManip", "Renderer"]);
    assert_eq!(set.len(), 3);
}

#[test]
fn insert_rejects_duplicate_type() {
    let mut set = ComponentSet::new();
    set.insert("door", Component::new("OldManip")).unwrap();

    let err = set.insert("door", Component::new("OldManip")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ComponentExists { .. }));
    assert_eq!(set.len(), 1);
}

#[test]
fn replace_keeps_slot() {
    let mut set = ComponentSet::new();
    set.insert("door", Component::new("Transform")).unwrap();
    set.insert("door", Component::new("OldManip").with("smoothingActive", true))
        .unwrap();
    set.insert("door", Component::new("Renderer")).unwrap();

    let old = set
        .replace("door", &tag("OldManip"), Component::new("NewManip"))
        .unwrap();

    assert_eq!(old.field("smoothingActive"), Some(&Value::Bool(true)));
    let tags: Vec<_> = set.tags().map(ComponentTag::as_str).collect();
    assert_eq!(tags, vec!["Transform", "NewManip", "Renderer"]);
}

#[test]
fn replace_missing_component_fails() {
    let mut set = ComponentSet::new();
    let err = set
        .replace("door", &tag("OldManip"), Component::new("NewManip"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ComponentNotFound { .. }));
    assert!(set.is_empty());
}

#[test]
fn replace_into_existing_type_leaves_set_untouched() {
    let mut set = ComponentSet::new();
    set.insert("door", Component::new("OldManip")).unwrap();
    set.insert("door", Component::new("NewManip")).unwrap();

    let err = set
        .replace("door", &tag("OldManip"), Component::new("NewManip"))
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::ComponentExists { .. }));
    assert!(set.has(&tag("OldManip")));
    assert_eq!(set.len(), 2);
}

#[test]
fn remove_returns_component() {
    let mut set = ComponentSet::new();
    set.insert("door", Component::new("OldManip").with("allowFarManipulation", false))
        .unwrap();

    let removed = set.remove(&tag("OldManip")).unwrap();
    assert_eq!(removed.field("allowFarManipulation"), Some(&Value::Bool(false)));
    assert!(set.remove(&tag("OldManip")).is_none());
}

// =============================================================================
// Schemas
// =============================================================================

fn bounds_schema() -> ComponentSchema {
    ComponentSchema::new("NewBounds")
        .with_field(FieldSchema::required("target", Type::Ref))
        .with_field(FieldSchema::optional("scaleHandleSize", Type::Float, 0.016))
        .with_field(FieldSchema::optional("rotationHandlesEnabled", Type::Bool, true))
}

#[test]
fn defaults_cover_optional_fields() {
    let defaults = bounds_schema().defaults();
    assert_eq!(defaults.len(), 2);
    assert_eq!(defaults.get(&"scaleHandleSize".into()), Some(&Value::Float(0.016)));
}

#[test]
fn instantiate_overlays_defaults() {
    let target = ObjectId::new(2, 1);
    let component = bounds_schema()
        .instantiate(&fields([
            ("target", Value::Ref(target)),
            ("scaleHandleSize", Value::Float(0.05)),
        ]))
        .unwrap();

    assert_eq!(component.tag.as_str(), "NewBounds");
    assert_eq!(component.field("target"), Some(&Value::Ref(target)));
    assert_eq!(component.field("scaleHandleSize"), Some(&Value::Float(0.05)));
    assert_eq!(component.field("rotationHandlesEnabled"), Some(&Value::Bool(true)));
}

#[test]
fn instantiate_requires_required_fields() {
    let err = bounds_schema().instantiate(&Fields::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::FieldNotFound { .. }));
}

#[test]
fn validate_rejects_undeclared_field() {
    let err = bounds_schema()
        .validate(&fields([
            ("target", Value::Ref(ObjectId::new(0, 1))),
            ("wireframe", Value::Bool(true)),
        ]))
        .unwrap_err();
    match err.kind {
        ErrorKind::FieldNotFound { field, .. } => assert_eq!(field, "wireframe"),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn validate_rejects_wrong_type() {
    let err = bounds_schema()
        .validate(&fields([("target", Value::from("cube"))]))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}
