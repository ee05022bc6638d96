//! Schema definitions for component types.
//!
//! A schema declares the fields of a component type with their types and
//! defaults. Replacement components are built from their schema so every
//! field the old component did not map still gets its default.

use std::sync::Arc;

use reforge_foundation::{ComponentTag, Error, Fields, Result, Type, Value};

use crate::component::Component;

/// Schema definition for a component type.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentSchema {
    /// Component type.
    pub tag: ComponentTag,
    /// Field definitions.
    pub fields: Vec<FieldSchema>,
}

impl ComponentSchema {
    /// Creates a new component schema with no fields.
    #[must_use]
    pub fn new(tag: impl Into<ComponentTag>) -> Self {
        Self {
            tag: tag.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the schema.
    #[must_use]
    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the field schema by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| &*f.name == name)
    }

    /// Returns the default value of every field that declares one.
    #[must_use]
    pub fn defaults(&self) -> Fields {
        self.fields
            .iter()
            .filter_map(|f| f.default.clone().map(|d| (f.name.clone(), d)))
            .collect()
    }

    /// Checks field values against this schema.
    ///
    /// # Errors
    ///
    /// Returns `FieldNotFound` for undeclared or missing required fields,
    /// and `TypeMismatch` for values of the wrong type.
    pub fn validate(&self, fields: &Fields) -> Result<()> {
        for (name, value) in fields.iter() {
            let schema = self
                .field(name)
                .ok_or_else(|| Error::field_not_found(self.tag.clone(), name.to_string()))?;
            if !schema.ty.accepts(value) {
                return Err(Error::type_mismatch(schema.ty.clone(), value.value_type()));
            }
        }
        for field in self.fields.iter().filter(|f| f.required) {
            if !fields.contains_key(&field.name) {
                return Err(Error::field_not_found(
                    self.tag.clone(),
                    field.name.to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Builds a component of this type from defaults overlaid with `fields`.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged fields fail validation.
    pub fn instantiate(&self, fields: &Fields) -> Result<Component> {
        let merged = self.defaults().union(fields);
        self.validate(&merged)?;
        Ok(Component::with_fields(self.tag.clone(), merged))
    }
}

/// Schema definition for a component field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSchema {
    /// Field name.
    pub name: Arc<str>,
    /// Field type.
    pub ty: Type,
    /// Default value if not provided.
    pub default: Option<Value>,
    /// Whether the field is required.
    pub required: bool,
}

impl FieldSchema {
    /// Creates a required field with no default.
    #[must_use]
    pub fn required(name: &str, ty: Type) -> Self {
        Self {
            name: Arc::from(name),
            ty,
            default: None,
            required: true,
        }
    }

    /// Creates an optional field with a default value.
    #[must_use]
    pub fn optional(name: &str, ty: Type, default: impl Into<Value>) -> Self {
        Self {
            name: Arc::from(name),
            ty,
            default: Some(default.into()),
            required: false,
        }
    }
}
