//! Registry of migration handlers keyed by legacy component tag.

use std::collections::HashMap;

use reforge_foundation::{ComponentTag, Error, Result};

use crate::handler::MigrationHandler;
use crate::handlers::LegacyKind;

/// Maps legacy component tags to the handlers that migrate them.
///
/// The registry is a plain value handed to the
/// [`Migrator`](crate::Migrator); there is no process-wide instance.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<ComponentTag, Box<dyn MigrationHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding a handler for every [`LegacyKind`].
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in LegacyKind::ALL {
            registry.register(kind.handler());
        }
        registry
    }

    /// Registers a handler under its legacy tag.
    ///
    /// Returns the handler previously registered for that tag, if any.
    pub fn register(
        &mut self,
        handler: impl MigrationHandler + 'static,
    ) -> Option<Box<dyn MigrationHandler>> {
        let tag = handler.legacy_tag().clone();
        self.handlers.insert(tag, Box::new(handler))
    }

    /// Returns the handler for a legacy tag.
    ///
    /// # Errors
    ///
    /// Returns `HandlerNotFound` if no handler is registered for `tag`.
    pub fn lookup(&self, tag: &ComponentTag) -> Result<&dyn MigrationHandler> {
        self.handlers
            .get(tag)
            .map(AsRef::as_ref)
            .ok_or_else(|| Error::handler_not_found(tag.clone()))
    }

    /// Returns true if a handler is registered for `tag`.
    #[must_use]
    pub fn contains(&self, tag: &ComponentTag) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Returns every registered legacy tag, sorted.
    #[must_use]
    pub fn legacy_tags(&self) -> Vec<ComponentTag> {
        let mut tags: Vec<_> = self.handlers.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
