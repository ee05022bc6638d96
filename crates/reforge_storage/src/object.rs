//! Migratable objects.

use reforge_foundation::ObjectId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentSet};

/// A container of components: a live instance, a template root, or a root
/// inside an aggregate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Object {
    /// Identity within the object's backing representation.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Attached components.
    pub components: ComponentSet,
}

impl Object {
    /// Creates an object with no components.
    #[must_use]
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            components: ComponentSet::new(),
        }
    }

    /// Returns the component of the given type, if attached.
    #[must_use]
    pub fn component(&self, tag: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.tag.as_str() == tag)
    }

    /// Returns true if a component of the given type is attached.
    #[must_use]
    pub fn has(&self, tag: &str) -> bool {
        self.component(tag).is_some()
    }
}
