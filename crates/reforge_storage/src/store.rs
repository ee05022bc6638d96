//! The object store interface used by the migration engine.

use reforge_foundation::{ComponentTag, Error, ErrorKind, Result};

use crate::component::{Component, ComponentSet};
use crate::handle::{Handle, ObjectKey, Origin};

/// Access to objects and their components, wherever they are persisted.
///
/// Mutations on document-backed objects are staged in memory until
/// [`ObjectStore::save`] writes the whole document, or
/// [`ObjectStore::discard`] drops the staged edits.
pub trait ObjectStore {
    /// Expands a handle into the keys of the objects it names.
    ///
    /// # Errors
    ///
    /// Returns `HandleResolution` if the handle names nothing in the store.
    fn resolve(&self, handle: &Handle) -> Result<Vec<ObjectKey>>;

    /// Returns the full component set of an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the key no longer resolves.
    fn components(&self, key: &ObjectKey) -> Result<ComponentSet>;

    /// Returns the component of the given type, if attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the key no longer resolves.
    fn get_component(&self, key: &ObjectKey, tag: &ComponentTag) -> Result<Option<Component>> {
        Ok(self.components(key)?.get(tag).cloned())
    }

    /// Attaches a component to an object.
    ///
    /// # Errors
    ///
    /// Returns `ComponentExists` if the object already has that type.
    fn add_component(&mut self, key: &ObjectKey, component: Component) -> Result<()>;

    /// Detaches and returns a component.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if the object has no such component.
    fn remove_component(&mut self, key: &ObjectKey, tag: &ComponentTag) -> Result<Component>;

    /// Replaces the component of type `old` with `new` as one step.
    ///
    /// Either the replacement is attached and the old component returned,
    /// or the object is left with its original components.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if `old` is not attached, or the error
    /// that prevented attaching `new`.
    fn replace_component(
        &mut self,
        key: &ObjectKey,
        old: &ComponentTag,
        new: Component,
    ) -> Result<Component> {
        let removed = self.remove_component(key, old)?;
        if let Err(err) = self.add_component(key, new) {
            self.add_component(key, removed).map_err(|restore| {
                Error::new(ErrorKind::Internal(format!(
                    "could not restore {old} on {key} after failed replacement ({err}): {restore}"
                )))
            })?;
            return Err(err);
        }
        Ok(removed)
    }

    /// Persists every staged change of a backing representation.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the write fails; staged edits are then
    /// discarded so the stored representation stays as it was.
    fn save(&mut self, origin: &Origin) -> Result<()>;

    /// Drops unsaved edits of a backing representation.
    fn discard(&mut self, origin: &Origin);
}
