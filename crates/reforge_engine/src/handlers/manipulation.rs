//! `OldManip` to `NewManip`.
//!
//! The legacy manipulation component stored single enumeration literals
//! where the replacement uses flag sets, and a single smoothing amount
//! where the replacement has per-transform lerp times.

use reforge_foundation::{Error, Result, Type, Value};
use reforge_storage::{ComponentSchema, FieldSchema};

use crate::handler::{FieldRule, MappedHandler};

/// Legacy component tag.
pub const LEGACY: &str = "OldManip";
/// Replacement component tag.
pub const REPLACEMENT: &str = "NewManip";

const HANDEDNESS: &[(&str, &[&str])] = &[
    ("OneHanded", &["OneHanded"]),
    ("TwoHanded", &["TwoHanded"]),
    ("OneAndTwoHanded", &["OneHanded", "TwoHanded"]),
];

const TWO_HANDED: &[(&str, &[&str])] = &[
    ("Move", &["Move"]),
    ("Rotate", &["Rotate"]),
    ("Scale", &["Scale"]),
    ("MoveRotate", &["Move", "Rotate"]),
    ("MoveScale", &["Move", "Scale"]),
    ("RotateScale", &["Rotate", "Scale"]),
    ("MoveRotateScale", &["Move", "Rotate", "Scale"]),
];

const RELEASE: &[(&str, &[&str])] = &[
    ("Nothing", &[]),
    ("KeepVelocity", &["KeepVelocity"]),
    ("KeepAngularVelocity", &["KeepAngularVelocity"]),
    ("KeepBoth", &["KeepVelocity", "KeepAngularVelocity"]),
];

const ROTATION_MODES: &[(&str, &str)] = &[
    ("MaintainRotationToUser", "MaintainRotationToUser"),
    (
        "GravityAlignedMaintainRotationToUser",
        "GravityAlignedMaintainRotationToUser",
    ),
    ("FaceUser", "FaceUser"),
    ("FaceAwayFromUser", "FaceAwayFromUser"),
    ("MaintainOriginalRotation", "MaintainOriginalRotation"),
    ("RotateAboutObjectCenter", "RotateAboutObjectCenter"),
    ("RotateAboutGrabPoint", "RotateAboutGrabPoint"),
    ("Default", "RotateAboutGrabPoint"),
];

const DEFAULT_LERP_TIME: f64 = 0.001;

/// Checks that a smoothing amount lies in `0..=1` and carries it over as a
/// float lerp time.
fn lerp_time(value: &Value) -> Result<Value> {
    let amount = value
        .as_number()
        .ok_or_else(|| Error::type_mismatch(Type::Float, value.value_type()))?;
    if !(0.0..=1.0).contains(&amount) {
        return Err(Error::invalid_value(
            "smoothing",
            format!("amount {amount} is outside 0..=1"),
        ));
    }
    Ok(Value::Float(amount))
}

fn flags(names: &[&str]) -> Value {
    Value::from(names.iter().map(Value::enumeration).collect::<Vec<_>>())
}

/// Schema of `NewManip`.
#[must_use]
pub fn schema() -> ComponentSchema {
    ComponentSchema::new(REPLACEMENT)
        .with_field(FieldSchema::optional("hostTransform", Type::option(Type::Ref), Value::Nil))
        .with_field(FieldSchema::optional(
            "manipulationType",
            Type::vec(Type::Enum),
            flags(&["OneHanded", "TwoHanded"]),
        ))
        .with_field(FieldSchema::optional(
            "twoHandedManipulationType",
            Type::vec(Type::Enum),
            flags(&["Move", "Rotate", "Scale"]),
        ))
        .with_field(FieldSchema::optional("allowFarManipulation", Type::Bool, true))
        .with_field(FieldSchema::optional(
            "oneHandRotationModeNear",
            Type::Enum,
            Value::enumeration("RotateAboutGrabPoint"),
        ))
        .with_field(FieldSchema::optional(
            "oneHandRotationModeFar",
            Type::Enum,
            Value::enumeration("RotateAboutGrabPoint"),
        ))
        .with_field(FieldSchema::optional(
            "releaseBehavior",
            Type::vec(Type::Enum),
            flags(&["KeepVelocity", "KeepAngularVelocity"]),
        ))
        .with_field(FieldSchema::optional("smoothingFar", Type::Bool, true))
        .with_field(FieldSchema::optional("smoothingNear", Type::Bool, true))
        .with_field(FieldSchema::optional("moveLerpTime", Type::Float, DEFAULT_LERP_TIME))
        .with_field(FieldSchema::optional("rotateLerpTime", Type::Float, DEFAULT_LERP_TIME))
        .with_field(FieldSchema::optional("scaleLerpTime", Type::Float, DEFAULT_LERP_TIME))
}

/// Builds the `OldManip` handler.
#[must_use]
pub fn handler() -> MappedHandler {
    MappedHandler::new(LEGACY, schema()).with_rules([
        FieldRule::Copy { from: "hostTransform", to: "hostTransform" },
        FieldRule::Flags { from: "manipulationType", to: "manipulationType", values: HANDEDNESS },
        FieldRule::Flags {
            from: "twoHandedManipulationType",
            to: "twoHandedManipulationType",
            values: TWO_HANDED,
        },
        FieldRule::Copy { from: "allowFarManipulation", to: "allowFarManipulation" },
        FieldRule::Rename {
            from: "oneHandRotationModeNear",
            to: "oneHandRotationModeNear",
            values: ROTATION_MODES,
        },
        FieldRule::Rename {
            from: "oneHandRotationModeFar",
            to: "oneHandRotationModeFar",
            values: ROTATION_MODES,
        },
        FieldRule::Flags { from: "releaseBehavior", to: "releaseBehavior", values: RELEASE },
        FieldRule::Copy { from: "smoothingActive", to: "smoothingFar" },
        FieldRule::Copy { from: "smoothingActive", to: "smoothingNear" },
        FieldRule::Convert {
            from: "smoothingAmountOneHandManip",
            to: "moveLerpTime",
            convert: lerp_time,
        },
        FieldRule::Convert {
            from: "smoothingAmountOneHandManip",
            to: "rotateLerpTime",
            convert: lerp_time,
        },
        FieldRule::Convert {
            from: "smoothingAmountOneHandManip",
            to: "scaleLerpTime",
            convert: lerp_time,
        },
    ])
}
