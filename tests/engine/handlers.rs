//! Integration tests for migration handlers
//!
//! Tests the built-in handlers and handlers assembled from field rules.

use reforge_engine::handlers::{bounds, manipulation};
use reforge_engine::{FieldRule, LegacyKind, MappedHandler, MigrationHandler};
use reforge_foundation::{ComponentTag, Error, ErrorKind, ObjectId, Result, Type, Value};
use reforge_storage::{Component, ComponentSchema, FieldSchema};

fn flags(names: &[&str]) -> Value {
    Value::from(names.iter().map(Value::enumeration).collect::<Vec<_>>())
}

// =============================================================================
// OldManip
// =============================================================================

#[test]
fn manipulation_maps_enumerations_to_flags() {
    let old = Component::new("OldManip")
        .with("manipulationType", Value::enumeration("TwoHanded"))
        .with("twoHandedManipulationType", Value::enumeration("RotateScale"))
        .with("releaseBehavior", Value::enumeration("KeepVelocity"));

    let new = manipulation::handler().migrate(&old).unwrap();

    assert_eq!(new.tag.as_str(), "NewManip");
    assert_eq!(new.field("manipulationType"), Some(&flags(&["TwoHanded"])));
    assert_eq!(new.field("twoHandedManipulationType"), Some(&flags(&["Rotate", "Scale"])));
    assert_eq!(new.field("releaseBehavior"), Some(&flags(&["KeepVelocity"])));
}

#[test]
fn manipulation_splits_smoothing() {
    let old = Component::new("OldManip")
        .with("smoothingActive", false)
        .with("smoothingAmountOneHandManip", 0.75);

    let new = manipulation::handler().migrate(&old).unwrap();

    assert_eq!(new.field("smoothingNear"), Some(&Value::Bool(false)));
    assert_eq!(new.field("smoothingFar"), Some(&Value::Bool(false)));
    for field in ["moveLerpTime", "rotateLerpTime", "scaleLerpTime"] {
        assert_eq!(new.field(field), Some(&Value::Float(0.75)));
    }
}

#[test]
fn manipulation_keeps_host_reference() {
    let host = ObjectId::new(3, 1);
    let old = Component::new("OldManip").with("hostTransform", host);
    let new = manipulation::handler().migrate(&old).unwrap();
    assert_eq!(new.field("hostTransform"), Some(&Value::Ref(host)));
}

#[test]
fn manipulation_nil_fields_get_defaults() {
    let old = Component::new("OldManip")
        .with("hostTransform", Value::Nil)
        .with("allowFarManipulation", Value::Nil);
    let new = manipulation::handler().migrate(&old).unwrap();
    assert_eq!(new.fields, manipulation::schema().defaults());
}

#[test]
fn manipulation_rejects_wrong_value_type() {
    let old = Component::new("OldManip").with("manipulationType", "OneHanded");
    let err = manipulation::handler().migrate(&old).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn manipulation_rejects_unknown_literal() {
    let old = Component::new("OldManip").with("releaseBehavior", Value::enumeration("Bounce"));
    let err = manipulation::handler().migrate(&old).unwrap_err();
    match err.kind {
        ErrorKind::InvalidValue { field, message } => {
            assert_eq!(field, "OldManip.releaseBehavior");
            assert!(message.contains("Bounce"));
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

// =============================================================================
// OldBounds
// =============================================================================

#[test]
fn bounds_is_destructive() {
    let handler = bounds::handler();
    assert!(handler.requires_confirmation());
    assert_eq!(handler.replacement_tag().as_str(), "NewBounds");
}

#[test]
fn bounds_renames_calculation_method() {
    let old = Component::new("OldBounds")
        .with("boundsCalculationMethod", Value::enumeration("ColliderOnly"))
        .with("showScaleHandles", false);
    let new = bounds::handler().migrate(&old).unwrap();

    assert_eq!(new.field("calculationMethod"), Some(&Value::enumeration("ColliderOnly")));
    assert_eq!(new.field("scaleHandlesEnabled"), Some(&Value::Bool(false)));
}

// =============================================================================
// Legacy Kinds
// =============================================================================

#[test]
fn legacy_kind_lookup() {
    assert_eq!(
        LegacyKind::from_tag(&ComponentTag::new("OldManip")),
        Some(LegacyKind::Manipulation)
    );
    assert_eq!(
        LegacyKind::from_tag(&ComponentTag::new("OldBounds")),
        Some(LegacyKind::Bounds)
    );
    assert_eq!(LegacyKind::from_tag(&ComponentTag::new("NewManip")), None);
}

#[test]
fn legacy_kind_handlers_match_names() {
    for kind in LegacyKind::ALL {
        let handler = kind.handler();
        assert_eq!(handler.legacy_tag().as_str(), kind.legacy_name());
        assert_eq!(handler.replacement_tag().as_str(), kind.replacement_name());
    }
}

// =============================================================================
// Custom Handlers
// =============================================================================

const SPEEDS: &[(&str, &str)] = &[("Slow", "Gentle"), ("Fast", "Quick")];

#[allow(clippy::cast_precision_loss)]
fn percent(value: &Value) -> Result<Value> {
    let n = value
        .as_int()
        .ok_or_else(|| Error::type_mismatch(Type::Int, value.value_type()))?;
    if !(0..=100).contains(&n) {
        return Err(Error::invalid_value("percent", format!("{n} is not a percentage")));
    }
    Ok(Value::Float(n as f64 / 100.0))
}

fn slider_handler() -> MappedHandler {
    let schema = ComponentSchema::new("NewSlider")
        .with_field(FieldSchema::optional("speed", Type::Enum, Value::enumeration("Gentle")))
        .with_field(FieldSchema::optional("value", Type::Float, 0.0))
        .with_field(FieldSchema::optional("label", Type::String, ""));
    MappedHandler::new("OldSlider", schema)
        .with_rule(FieldRule::Rename { from: "speed", to: "speed", values: SPEEDS })
        .with_rule(FieldRule::Convert { from: "percent", to: "value", convert: percent })
        .with_rule(FieldRule::Copy { from: "text", to: "label" })
}

#[test]
fn custom_handler_applies_rules() {
    let old = Component::new("OldSlider")
        .with("speed", Value::enumeration("Fast"))
        .with("percent", 40)
        .with("text", "Volume");

    let new = slider_handler().migrate(&old).unwrap();

    assert_eq!(new.field("speed"), Some(&Value::enumeration("Quick")));
    assert_eq!(new.field("value"), Some(&Value::Float(0.4)));
    assert_eq!(new.field("label"), Some(&Value::from("Volume")));
}

#[test]
fn custom_handler_qualifies_conversion_errors() {
    let old = Component::new("OldSlider").with("percent", 140);
    let err = slider_handler().migrate(&old).unwrap_err();
    match err.kind {
        ErrorKind::InvalidValue { field, .. } => assert_eq!(field, "OldSlider.percent"),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn custom_handler_map_fields_only_has_mapped() {
    let old = Component::new("OldSlider").with("text", "Volume").with("color", "red");
    let handler = slider_handler();

    let mapped = handler.map_fields(&old).unwrap();
    assert_eq!(mapped.len(), 1);

    let dropped = handler.dropped_fields(&old);
    assert_eq!(dropped.len(), 1);
    assert_eq!(&*dropped[0], "color");
}

#[test]
fn rules_report_source_and_target() {
    let handler = slider_handler();
    let pairs: Vec<_> = handler.rules().iter().map(|r| (r.source(), r.target())).collect();
    assert_eq!(pairs, vec![("speed", "speed"), ("percent", "value"), ("text", "label")]);
    assert!(!handler.requires_confirmation());
}
