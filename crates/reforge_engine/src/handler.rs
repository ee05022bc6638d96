//! Migration handlers.
//!
//! A handler is a pure mapping from the data of a legacy component to the
//! field values of its replacement. The replacement itself is built from
//! the handler's schema, so fields the handler does not map get their
//! declared defaults.

use std::fmt;
use std::sync::Arc;

use reforge_foundation::{ComponentTag, Error, ErrorKind, Fields, LtVec, Result, Type, Value};
use reforge_storage::{Component, ComponentSchema};

/// Maps a legacy component to its replacement.
pub trait MigrationHandler: fmt::Debug {
    /// Tag of the component this handler migrates.
    fn legacy_tag(&self) -> &ComponentTag;

    /// Schema of the replacement component.
    fn schema(&self) -> &ComponentSchema;

    /// Tag of the replacement component.
    fn replacement_tag(&self) -> &ComponentTag {
        &self.schema().tag
    }

    /// Whether applying this handler loses data and should be confirmed.
    fn requires_confirmation(&self) -> bool {
        false
    }

    /// Computes the replacement field values carried over from `old`.
    ///
    /// # Errors
    ///
    /// Returns an error if a legacy value cannot be mapped.
    fn map_fields(&self, old: &Component) -> Result<Fields>;

    /// Legacy fields of `old` the replacement has no place for.
    fn dropped_fields(&self, old: &Component) -> Vec<Arc<str>> {
        let _ = old;
        Vec::new()
    }

    /// Builds the replacement component for `old`.
    ///
    /// # Errors
    ///
    /// Returns an error if mapping fails or the result does not fit the
    /// replacement schema.
    fn migrate(&self, old: &Component) -> Result<Component> {
        self.schema().instantiate(&self.map_fields(old)?)
    }
}

/// Converts a single legacy value.
pub type Convert = fn(&Value) -> Result<Value>;

/// How one legacy field is carried into the replacement.
///
/// Absent or nil legacy fields are skipped, leaving the replacement default.
#[derive(Clone, Copy, Debug)]
pub enum FieldRule {
    /// Copy the value unchanged.
    Copy {
        /// Legacy field.
        from: &'static str,
        /// Replacement field.
        to: &'static str,
    },
    /// Rename enumeration literals by table lookup.
    Rename {
        /// Legacy field.
        from: &'static str,
        /// Replacement field.
        to: &'static str,
        /// Legacy literal to replacement literal.
        values: &'static [(&'static str, &'static str)],
    },
    /// Expand an enumeration literal into a set of flag literals.
    Flags {
        /// Legacy field.
        from: &'static str,
        /// Replacement field.
        to: &'static str,
        /// Legacy literal to replacement flags.
        values: &'static [(&'static str, &'static [&'static str])],
    },
    /// Apply an arbitrary conversion.
    Convert {
        /// Legacy field.
        from: &'static str,
        /// Replacement field.
        to: &'static str,
        /// The conversion.
        convert: Convert,
    },
}

impl FieldRule {
    /// Legacy field this rule reads.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        match self {
            Self::Copy { from, .. }
            | Self::Rename { from, .. }
            | Self::Flags { from, .. }
            | Self::Convert { from, .. } => *from,
        }
    }

    /// Replacement field this rule writes.
    #[must_use]
    pub const fn target(&self) -> &'static str {
        match self {
            Self::Copy { to, .. }
            | Self::Rename { to, .. }
            | Self::Flags { to, .. }
            | Self::Convert { to, .. } => *to,
        }
    }

    /// Maps the legacy value, or returns `None` when there is nothing to carry.
    fn apply(&self, old: &Component) -> Result<Option<Value>> {
        let value = match old.field(self.source()) {
            None | Some(Value::Nil) => return Ok(None),
            Some(value) => value,
        };
        let qualified = || format!("{}.{}", old.tag, self.source());

        let mapped = match self {
            Self::Copy { .. } => value.clone(),
            Self::Rename { values, .. } => {
                let literal = enum_literal(value)?;
                let renamed = lookup(values, literal).ok_or_else(|| {
                    Error::invalid_value(qualified(), format!("unknown literal {literal}"))
                })?;
                Value::enumeration(renamed)
            }
            Self::Flags { values, .. } => {
                let literal = enum_literal(value)?;
                let flags = lookup(values, literal).ok_or_else(|| {
                    Error::invalid_value(qualified(), format!("unknown literal {literal}"))
                })?;
                Value::Vec(flags.iter().map(Value::enumeration).collect::<LtVec<_>>())
            }
            Self::Convert { convert, .. } => convert(value).map_err(|err| match err.kind {
                ErrorKind::InvalidValue { message, .. } => {
                    Error::invalid_value(qualified(), message)
                }
                _ => err,
            })?,
        };
        Ok(Some(mapped))
    }
}

fn enum_literal(value: &Value) -> Result<&str> {
    value
        .as_enum()
        .ok_or_else(|| Error::type_mismatch(Type::Enum, value.value_type()))
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// A handler described by a table of field rules.
#[derive(Clone, Debug)]
pub struct MappedHandler {
    legacy: ComponentTag,
    schema: ComponentSchema,
    rules: Vec<FieldRule>,
    requires_confirmation: bool,
}

impl MappedHandler {
    /// Creates a handler that maps no fields.
    #[must_use]
    pub fn new(legacy: impl Into<ComponentTag>, schema: ComponentSchema) -> Self {
        Self {
            legacy: legacy.into(),
            schema,
            rules: Vec::new(),
            requires_confirmation: false,
        }
    }

    /// Adds a field rule.
    #[must_use]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several field rules.
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = FieldRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Marks the handler as needing confirmation before it is applied.
    #[must_use]
    pub fn with_confirmation(mut self, required: bool) -> Self {
        self.requires_confirmation = required;
        self
    }

    /// Returns the field rules in application order.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}

impl MigrationHandler for MappedHandler {
    fn legacy_tag(&self) -> &ComponentTag {
        &self.legacy
    }

    fn schema(&self) -> &ComponentSchema {
        &self.schema
    }

    fn requires_confirmation(&self) -> bool {
        self.requires_confirmation
    }

    fn map_fields(&self, old: &Component) -> Result<Fields> {
        let mut fields = Fields::new();
        for rule in &self.rules {
            if let Some(value) = rule.apply(old)? {
                fields = fields.insert(Arc::from(rule.target()), value);
            }
        }
        Ok(fields)
    }

    fn dropped_fields(&self, old: &Component) -> Vec<Arc<str>> {
        old.fields
            .keys()
            .filter(|name| !self.rules.iter().any(|r| r.source() == &***name))
            .cloned()
            .collect()
    }
}
