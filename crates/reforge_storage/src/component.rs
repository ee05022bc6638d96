//! Components and the per-object component set.
//!
//! An object carries at most one component per tag. Components keep the
//! order in which they were attached, and a replacement takes the slot of
//! the component it replaces.

use std::sync::Arc;

use reforge_foundation::{ComponentTag, Error, Fields, Result, Value};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A typed data blob attached to one object.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    /// The component type.
    pub tag: ComponentTag,
    /// Field values.
    pub fields: Fields,
}

impl Component {
    /// Creates a component with no field data.
    #[must_use]
    pub fn new(tag: impl Into<ComponentTag>) -> Self {
        Self {
            tag: tag.into(),
            fields: Fields::new(),
        }
    }

    /// Creates a component with the given field data.
    #[must_use]
    pub fn with_fields(tag: impl Into<ComponentTag>, fields: Fields) -> Self {
        Self {
            tag: tag.into(),
            fields,
        }
    }

    /// Returns a copy with one field set.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields = self.fields.insert(Arc::from(field), value.into());
        self
    }

    /// Gets a field value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(&Arc::from(name))
    }
}

/// Ordered set of components attached to a single object.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ComponentSet {
    components: Vec<Component>,
}

impl ComponentSet {
    /// Creates an empty component set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if no component is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Checks if a component of the given type is attached.
    #[must_use]
    pub fn has(&self, tag: &ComponentTag) -> bool {
        self.position(tag).is_some()
    }

    /// Gets the component of the given type.
    #[must_use]
    pub fn get(&self, tag: &ComponentTag) -> Option<&Component> {
        self.components.iter().find(|c| &c.tag == tag)
    }

    /// Attaches a component.
    ///
    /// # Errors
    ///
    /// Returns `ComponentExists` if a component of the same type is attached.
    pub fn insert(&mut self, owner: &str, component: Component) -> Result<()> {
        if self.has(&component.tag) {
            return Err(Error::component_exists(owner, component.tag));
        }
        self.components.push(component);
        Ok(())
    }

    /// Detaches and returns the component of the given type.
    pub fn remove(&mut self, tag: &ComponentTag) -> Option<Component> {
        let pos = self.position(tag)?;
        Some(self.components.remove(pos))
    }

    /// Replaces the component of type `old` with `new`, keeping its slot.
    ///
    /// Returns the replaced component. The set is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if `old` is not attached, or
    /// `ComponentExists` if another component already has `new`'s type.
    pub fn replace(&mut self, owner: &str, old: &ComponentTag, new: Component) -> Result<Component> {
        let pos = self
            .position(old)
            .ok_or_else(|| Error::component_not_found(owner, old.clone()))?;
        if &new.tag != old && self.has(&new.tag) {
            return Err(Error::component_exists(owner, new.tag));
        }
        Ok(std::mem::replace(&mut self.components[pos], new))
    }

    /// Returns the attached component types in order.
    pub fn tags(&self) -> impl Iterator<Item = &ComponentTag> {
        self.components.iter().map(|c| &c.tag)
    }

    /// Iterates over attached components in order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    fn position(&self, tag: &ComponentTag) -> Option<usize> {
        self.components.iter().position(|c| &c.tag == tag)
    }
}

impl FromIterator<Component> for ComponentSet {
    /// Collects components; later duplicates of a tag are dropped.
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut set = Self::new();
        for component in iter {
            if !set.has(&component.tag) {
                set.components.push(component);
            }
        }
        set
    }
}
