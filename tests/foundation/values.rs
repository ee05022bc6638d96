//! Integration tests for field values and types
//!
//! Tests value construction, accessors, display, and type acceptance.

use reforge_foundation::{ComponentTag, ObjectId, Type, Value, fields};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn from_conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(7), Value::Int(7));
    assert_eq!(Value::from(7_i64), Value::Int(7));
    assert_eq!(Value::from(0.5), Value::Float(0.5));
    assert_eq!(Value::from("door").as_str(), Some("door"));
    assert_eq!(Value::from(String::from("door")).as_str(), Some("door"));
    assert_eq!(
        Value::from(ObjectId::new(3, 1)).as_object(),
        Some(ObjectId::new(3, 1))
    );
}

#[test]
fn vec_from_items() {
    let value = Value::from(vec![Value::enumeration("Move"), Value::enumeration("Rotate")]);
    let items = value.as_vec().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items.get(1).and_then(Value::as_enum), Some("Rotate"));
}

#[test]
fn map_from_fields() {
    let value = Value::from(fields([("x", Value::Int(1)), ("y", Value::Int(2))]));
    let map = value.as_map().unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"y".into()), Some(&Value::Int(2)));
}

// =============================================================================
// Accessors
// =============================================================================

#[test]
fn accessors_reject_other_variants() {
    let value = Value::Int(3);
    assert_eq!(value.as_bool(), None);
    assert_eq!(value.as_str(), None);
    assert_eq!(value.as_enum(), None);
    assert_eq!(value.as_object(), None);
    assert!(value.as_vec().is_none());
    assert!(value.as_map().is_none());
    assert!(!value.is_nil());
    assert!(Value::Nil.is_nil());
}

#[test]
fn as_number_widens_ints() {
    assert_eq!(Value::Int(2).as_number(), Some(2.0));
    assert_eq!(Value::Float(0.25).as_number(), Some(0.25));
    assert_eq!(Value::from("2").as_number(), None);
}

#[test]
fn value_type_of_each_variant() {
    assert_eq!(Value::Nil.value_type(), Type::Nil);
    assert_eq!(Value::Bool(false).value_type(), Type::Bool);
    assert_eq!(Value::Float(1.0).value_type(), Type::Float);
    assert_eq!(Value::enumeration("FaceUser").value_type(), Type::Enum);
    assert_eq!(Value::Ref(ObjectId::new(0, 1)).value_type(), Type::Ref);
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_scalars() {
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Int(-4).to_string(), "-4");
    assert_eq!(Value::from("door").to_string(), "\"door\"");
    assert_eq!(Value::enumeration("KeepBoth").to_string(), "KeepBoth");
    assert_eq!(Value::Ref(ObjectId::new(12, 3)).to_string(), "#12");
}

#[test]
fn display_collections() {
    let flags = Value::from(vec![Value::enumeration("Move"), Value::enumeration("Scale")]);
    assert_eq!(flags.to_string(), "[Move Scale]");

    let record = Value::from(fields([("a", Value::Int(1)), ("b", Value::Bool(false))]));
    assert_eq!(record.to_string(), "{a: 1, b: false}");
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn float_accepts_int() {
    assert!(Type::Float.accepts(&Value::Int(1)));
    assert!(!Type::Int.accepts(&Value::Float(1.0)));
}

#[test]
fn option_accepts_nil_and_inner() {
    let ty = Type::option(Type::Ref);
    assert!(ty.accepts(&Value::Nil));
    assert!(ty.accepts(&Value::Ref(ObjectId::new(1, 1))));
    assert!(!ty.accepts(&Value::Int(1)));
}

#[test]
fn vec_checks_every_element() {
    let ty = Type::vec(Type::Enum);
    let good = Value::from(vec![Value::enumeration("OneHanded")]);
    let bad = Value::from(vec![Value::enumeration("OneHanded"), Value::Int(2)]);

    assert!(ty.accepts(&good));
    assert!(ty.accepts(&Value::from(Vec::<Value>::new())));
    assert!(!ty.accepts(&bad));
}

#[test]
fn any_accepts_everything() {
    for value in [Value::Nil, Value::Int(1), Value::from("x"), Value::enumeration("E")] {
        assert!(Type::Any.accepts(&value));
    }
}

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn object_id_generations_differ() {
    assert_ne!(ObjectId::new(4, 1), ObjectId::new(4, 3));
    assert_eq!(ObjectId::new(4, 1).to_string(), "#4");
    assert_eq!(format!("{:?}", ObjectId::new(4, 3)), "ObjectId(4v3)");
}

#[test]
fn null_object_id() {
    let null = ObjectId::null();
    assert!(null.is_null());
    assert!(!ObjectId::new(0, 1).is_null());
    assert_eq!(null.to_string(), "#null");
}

#[test]
fn component_tags_compare_by_name() {
    let a = ComponentTag::new("OldManip");
    let b = ComponentTag::from("OldManip");
    let c = ComponentTag::from(String::from("NewManip"));

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.as_str(), "OldManip");
    assert_eq!(c.to_string(), "NewManip");
}
