//! Error types for the Reforge system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::object::ObjectId;
use crate::tag::ComponentTag;
use crate::types::Type;

/// The main error type for Reforge operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a handle resolution error.
    #[must_use]
    pub fn handle_resolution(handle: impl Into<String>) -> Self {
        Self::new(ErrorKind::HandleResolution(handle.into()))
    }

    /// Creates a missing migration handler error.
    #[must_use]
    pub fn handler_not_found(tag: ComponentTag) -> Self {
        Self::new(ErrorKind::HandlerNotFound(tag))
    }

    /// Creates a persistence error for a failed store save.
    #[must_use]
    pub fn persistence(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Persistence {
            target: target.into(),
            message: message.into(),
        })
    }

    /// Creates a stale object reference error.
    #[must_use]
    pub fn stale_object(id: ObjectId) -> Self {
        Self::new(ErrorKind::StaleObject(id))
    }

    /// Creates a component not found error.
    #[must_use]
    pub fn component_not_found(object: impl Into<String>, component: ComponentTag) -> Self {
        Self::new(ErrorKind::ComponentNotFound {
            object: object.into(),
            component,
        })
    }

    /// Creates a duplicate component error.
    #[must_use]
    pub fn component_exists(object: impl Into<String>, component: ComponentTag) -> Self {
        Self::new(ErrorKind::ComponentExists {
            object: object.into(),
            component,
        })
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn field_not_found(component: ComponentTag, field: impl Into<String>) -> Self {
        Self::new(ErrorKind::FieldNotFound {
            component,
            field: field.into(),
        })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an invalid field value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidValue {
            field: field.into(),
            message: message.into(),
        })
    }

    /// Returns true if this error came from a failed store save.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self.kind, ErrorKind::Persistence { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A migration candidate could not be found in the store.
    #[error("handle could not be resolved: {0}")]
    HandleResolution(String),

    /// No migration handler is registered for a component type.
    #[error("no migration handler registered for {0}")]
    HandlerNotFound(ComponentTag),

    /// The store failed to persist changes.
    #[error("failed to save {target}: {message}")]
    Persistence {
        /// The instance, template or aggregate being saved.
        target: String,
        /// Description of the failure.
        message: String,
    },

    /// Object reference is stale (generation mismatch).
    #[error("stale object reference: {0:?}")]
    StaleObject(ObjectId),

    /// Component not found on object.
    #[error("component not found: {component} on {object}")]
    ComponentNotFound {
        /// The object that was queried.
        object: String,
        /// The component that was not found.
        component: ComponentTag,
    },

    /// Object already carries a component of this type.
    #[error("component already present: {component} on {object}")]
    ComponentExists {
        /// The object that was modified.
        object: String,
        /// The duplicate component.
        component: ComponentTag,
    },

    /// Field not declared by a component schema.
    #[error("field not found: {field} on component {component}")]
    FieldNotFound {
        /// The component that was queried.
        component: ComponentTag,
        /// The field name that was not found.
        field: String,
    },

    /// Type mismatch during field validation.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// Field holds a value a handler cannot map.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Store location (instance, template path or aggregate path).
    pub source: Option<String>,
    /// Chain of operations that led to the error, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
