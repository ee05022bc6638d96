//! `OldBounds` to `NewBounds`.
//!
//! The replacement has no counterpart for the legacy visual configuration
//! (materials, wireframe, per-axis rotation handles), so this handler asks
//! for confirmation before it is applied.

use reforge_foundation::{Error, Result, Type, Value};
use reforge_storage::{ComponentSchema, FieldSchema};

use crate::handler::{FieldRule, MappedHandler};

/// Legacy component tag.
pub const LEGACY: &str = "OldBounds";
/// Replacement component tag.
pub const REPLACEMENT: &str = "NewBounds";

const CALCULATION: &[(&str, &str)] = &[
    ("RendererOverCollider", "RendererOverCollider"),
    ("ColliderOverRenderer", "ColliderOverRenderer"),
    ("ColliderOnly", "ColliderOnly"),
    ("RendererOnly", "RendererOnly"),
];

const ACTIVATION: &[(&str, &str)] = &[
    ("ActivateOnStart", "ActivateOnStart"),
    ("ActivateByProximity", "ActivateByProximity"),
    ("ActivateByPointer", "ActivateByPointer"),
    ("ActivateByProximityAndPointer", "ActivateByProximityAndPointer"),
    ("ActivateManually", "ActivateManually"),
];

const FLATTEN: &[(&str, &str)] = &[
    ("DoNotFlatten", "DoNotFlatten"),
    ("FlattenX", "FlattenX"),
    ("FlattenY", "FlattenY"),
    ("FlattenZ", "FlattenZ"),
    ("FlattenAuto", "FlattenAuto"),
];

const DEFAULT_HANDLE_SIZE: f64 = 0.016;

fn handle_size(value: &Value) -> Result<Value> {
    let size = value
        .as_number()
        .ok_or_else(|| Error::type_mismatch(Type::Float, value.value_type()))?;
    if size <= 0.0 {
        return Err(Error::invalid_value(
            "handle size",
            format!("size {size} must be positive"),
        ));
    }
    Ok(Value::Float(size))
}

/// Schema of `NewBounds`.
#[must_use]
pub fn schema() -> ComponentSchema {
    ComponentSchema::new(REPLACEMENT)
        .with_field(FieldSchema::optional("target", Type::option(Type::Ref), Value::Nil))
        .with_field(FieldSchema::optional("boundsOverride", Type::option(Type::Ref), Value::Nil))
        .with_field(FieldSchema::optional(
            "calculationMethod",
            Type::Enum,
            Value::enumeration("RendererOverCollider"),
        ))
        .with_field(FieldSchema::optional(
            "activation",
            Type::Enum,
            Value::enumeration("ActivateOnStart"),
        ))
        .with_field(FieldSchema::optional(
            "flattenAxis",
            Type::Enum,
            Value::enumeration("DoNotFlatten"),
        ))
        .with_field(FieldSchema::optional("scaleHandleSize", Type::Float, DEFAULT_HANDLE_SIZE))
        .with_field(FieldSchema::optional("rotationHandleSize", Type::Float, DEFAULT_HANDLE_SIZE))
        .with_field(FieldSchema::optional("scaleHandlesEnabled", Type::Bool, true))
        .with_field(FieldSchema::optional("rotationHandlesEnabled", Type::Bool, true))
}

/// Builds the `OldBounds` handler.
#[must_use]
pub fn handler() -> MappedHandler {
    MappedHandler::new(LEGACY, schema())
        .with_rules([
            FieldRule::Copy { from: "targetObject", to: "target" },
            FieldRule::Copy { from: "boundsOverride", to: "boundsOverride" },
            FieldRule::Rename {
                from: "boundsCalculationMethod",
                to: "calculationMethod",
                values: CALCULATION,
            },
            FieldRule::Rename { from: "activation", to: "activation", values: ACTIVATION },
            FieldRule::Rename { from: "flattenAxis", to: "flattenAxis", values: FLATTEN },
            FieldRule::Convert { from: "scaleHandleSize", to: "scaleHandleSize", convert: handle_size },
            FieldRule::Convert {
                from: "rotationHandleSize",
                to: "rotationHandleSize",
                convert: handle_size,
            },
            FieldRule::Copy { from: "showScaleHandles", to: "scaleHandlesEnabled" },
            FieldRule::Copy { from: "showRotationHandles", to: "rotationHandlesEnabled" },
        ])
        .with_confirmation(true)
}
