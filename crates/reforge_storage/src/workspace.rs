//! In-memory object store over a document backend.
//!
//! A `Workspace` holds live instances directly and reaches templates and
//! aggregates through a [`DocumentBackend`]. Editing a document object
//! stages a copy of the whole document; `save` writes the staged copy back
//! and releases it.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use reforge_foundation::{ComponentTag, Error, ObjectId, Result};

use crate::allocator::ObjectAllocator;
use crate::component::{Component, ComponentSet};
use crate::document::{Document, DocumentBackend, DocumentKind, MemoryBackend};
use crate::handle::{Handle, ObjectKey, Origin};
use crate::object::Object;
use crate::store::ObjectStore;

/// Object store holding live instances plus a document backend.
#[derive(Debug)]
pub struct Workspace<B: DocumentBackend = MemoryBackend> {
    allocator: ObjectAllocator,
    instances: HashMap<ObjectId, Object>,
    backend: B,
    /// Documents with unsaved edits, by path.
    staged: HashMap<String, Document>,
}

impl Workspace<MemoryBackend> {
    /// Creates a workspace with an in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(MemoryBackend::new())
    }
}

impl Default for Workspace<MemoryBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: DocumentBackend> Workspace<B> {
    /// Creates a workspace over the given backend.
    #[must_use]
    pub fn with_backend(backend: B) -> Self {
        Self {
            allocator: ObjectAllocator::new(),
            instances: HashMap::new(),
            backend,
            staged: HashMap::new(),
        }
    }

    /// Returns the document backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the document backend mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // --- Instances ---

    /// Creates a live instance with no components.
    pub fn spawn(&mut self, name: impl Into<String>) -> ObjectId {
        let id = self.allocator.allocate();
        self.instances.insert(id, Object::new(id, name));
        id
    }

    /// Destroys a live instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or unknown.
    pub fn destroy(&mut self, id: ObjectId) -> Result<()> {
        self.allocator.release(id)?;
        self.instances.remove(&id);
        Ok(())
    }

    /// Returns a live instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or unknown.
    pub fn instance(&self, id: ObjectId) -> Result<&Object> {
        self.allocator.validate(id)?;
        self.instances
            .get(&id)
            .ok_or_else(|| Error::handle_resolution(format!("instance {id}")))
    }

    /// Iterates over live instances in id order.
    pub fn instances(&self) -> impl Iterator<Item = &Object> + '_ {
        self.allocator.iter().filter_map(|id| self.instances.get(&id))
    }

    /// Attaches a component to a live instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or the type is already attached.
    pub fn attach(&mut self, id: ObjectId, component: Component) -> Result<()> {
        self.add_component(&ObjectKey::instance(id), component)
    }

    // --- Documents ---

    /// Saves a copy of a live instance as a template document.
    ///
    /// # Errors
    ///
    /// Returns an error if the instance does not resolve or the write fails.
    pub fn save_as_template(&mut self, id: ObjectId, path: &str) -> Result<()> {
        let document = Document::capture(path, DocumentKind::Template, [self.instance(id)?]);
        self.write_document(&document)
    }

    /// Saves copies of live instances as the roots of an aggregate document.
    ///
    /// # Errors
    ///
    /// Returns an error if any instance does not resolve or the write fails.
    pub fn save_aggregate(&mut self, path: &str, roots: &[ObjectId]) -> Result<()> {
        let objects = roots
            .iter()
            .map(|id| self.instance(*id))
            .collect::<Result<Vec<_>>>()?;
        let document = Document::capture(path, DocumentKind::Aggregate, objects);
        self.write_document(&document)
    }

    /// Loads a fresh copy of a template's root object from the backend.
    ///
    /// # Errors
    ///
    /// Returns `HandleResolution` if no template exists at `path`.
    pub fn load_template(&self, path: &str) -> Result<Object> {
        let document = self.read_document(path, DocumentKind::Template)?;
        document
            .roots()
            .first()
            .cloned()
            .ok_or_else(|| Error::handle_resolution(format!("template {path} has no root")))
    }

    /// Loads fresh copies of an aggregate's root objects from the backend.
    ///
    /// # Errors
    ///
    /// Returns `HandleResolution` if no aggregate exists at `path`.
    pub fn open_aggregate(&self, path: &str) -> Result<Vec<Object>> {
        Ok(self
            .read_document(path, DocumentKind::Aggregate)?
            .roots()
            .to_vec())
    }

    /// Deletes a document and drops any staged edits to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot delete it.
    pub fn delete_document(&mut self, path: &str) -> Result<bool> {
        self.staged.remove(path);
        self.backend.delete(path)
    }

    /// Lists stored document paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be enumerated.
    pub fn documents(&self) -> Result<Vec<String>> {
        self.backend.paths()
    }

    /// Returns true if a document has unsaved edits.
    #[must_use]
    pub fn has_staged(&self, path: &str) -> bool {
        self.staged.contains_key(path)
    }

    fn write_document(&mut self, document: &Document) -> Result<()> {
        self.staged.remove(&document.path);
        self.backend
            .write(document)
            .map_err(|e| Error::persistence(format!("{} {}", document.kind, document.path), e.to_string()))?;
        tracing::debug!(path = %document.path, kind = %document.kind, "wrote document");
        Ok(())
    }

    /// Reads the stored (unstaged) version of a document.
    fn read_document(&self, path: &str, kind: DocumentKind) -> Result<Document> {
        let document = self
            .backend
            .read(path)?
            .ok_or_else(|| Error::handle_resolution(format!("{kind} {path}")))?;
        if document.kind != kind {
            return Err(Error::handle_resolution(format!(
                "{path} is a {}, not a {kind}",
                document.kind
            )));
        }
        Ok(document)
    }

    /// Returns the current view of a document: staged if edited, else stored.
    fn view_document(&self, path: &str, kind: DocumentKind) -> Result<Cow<'_, Document>> {
        match self.staged.get(path) {
            Some(document) => Ok(Cow::Borrowed(document)),
            None => self.read_document(path, kind).map(Cow::Owned),
        }
    }

    /// Returns the staged copy of a document, staging it on first use.
    fn stage_document(&mut self, path: &str, kind: DocumentKind) -> Result<&mut Document> {
        if !self.staged.contains_key(path) {
            let document = self.read_document(path, kind)?;
            tracing::debug!(path, %kind, "staged document for editing");
            self.staged.insert(path.to_string(), document);
        }
        self.staged
            .get_mut(path)
            .ok_or_else(|| Error::handle_resolution(format!("{kind} {path}")))
    }

    fn object(&self, key: &ObjectKey) -> Result<Cow<'_, Object>> {
        let Some((path, kind)) = document_of(&key.origin) else {
            return self.instance(key.id).map(Cow::Borrowed);
        };
        let object = match self.view_document(path, kind)? {
            Cow::Borrowed(document) => document.root(key.id).map(Cow::Borrowed),
            Cow::Owned(document) => document.root(key.id).cloned().map(Cow::Owned),
        };
        object.ok_or_else(|| Error::handle_resolution(key.to_string()))
    }

    fn object_mut(&mut self, key: &ObjectKey) -> Result<&mut Object> {
        let object = match document_of(&key.origin) {
            None => {
                self.allocator.validate(key.id)?;
                self.instances.get_mut(&key.id)
            }
            Some((path, kind)) => self.stage_document(path, kind)?.root_mut(key.id),
        };
        object.ok_or_else(|| Error::handle_resolution(key.to_string()))
    }
}

fn document_of(origin: &Origin) -> Option<(&str, DocumentKind)> {
    match origin {
        Origin::Instance => None,
        Origin::Template(path) => Some((path, DocumentKind::Template)),
        Origin::Aggregate(path) => Some((path, DocumentKind::Aggregate)),
    }
}

fn document_keys(document: &Document, origin: &Origin) -> Vec<ObjectKey> {
    document
        .roots()
        .iter()
        .map(|o| ObjectKey::new(origin.clone(), o.id))
        .collect()
}

impl<B: DocumentBackend> ObjectStore for Workspace<B> {
    fn resolve(&self, handle: &Handle) -> Result<Vec<ObjectKey>> {
        match handle {
            Handle::Instance(id) => {
                self.instance(*id)?;
                Ok(vec![ObjectKey::instance(*id)])
            }
            Handle::Template(path) => {
                let origin = Origin::Template(Arc::clone(path));
                let document = self.view_document(path, DocumentKind::Template)?;
                Ok(document_keys(&document, &origin))
            }
            Handle::Aggregate(path) => {
                let origin = Origin::Aggregate(Arc::clone(path));
                let document = self.view_document(path, DocumentKind::Aggregate)?;
                Ok(document_keys(&document, &origin))
            }
            Handle::AggregateRoot { path, root } => {
                let key = ObjectKey::new(Origin::Aggregate(Arc::clone(path)), *root);
                self.object(&key)?;
                Ok(vec![key])
            }
        }
    }

    fn components(&self, key: &ObjectKey) -> Result<ComponentSet> {
        Ok(self.object(key)?.components.clone())
    }

    fn add_component(&mut self, key: &ObjectKey, component: Component) -> Result<()> {
        let owner = key.to_string();
        self.object_mut(key)?.components.insert(&owner, component)
    }

    fn remove_component(&mut self, key: &ObjectKey, tag: &ComponentTag) -> Result<Component> {
        let owner = key.to_string();
        self.object_mut(key)?
            .components
            .remove(tag)
            .ok_or_else(|| Error::component_not_found(owner, tag.clone()))
    }

    fn replace_component(
        &mut self,
        key: &ObjectKey,
        old: &ComponentTag,
        new: Component,
    ) -> Result<Component> {
        let owner = key.to_string();
        self.object_mut(key)?.components.replace(&owner, old, new)
    }

    fn save(&mut self, origin: &Origin) -> Result<()> {
        let Some(path) = origin.path() else {
            // Instances are edited in place.
            return Ok(());
        };
        let Some(document) = self.staged.remove(path) else {
            return Ok(());
        };
        self.backend
            .write(&document)
            .map_err(|e| Error::persistence(origin.to_string(), e.to_string()))?;
        tracing::debug!(%origin, "saved staged document");
        Ok(())
    }

    fn discard(&mut self, origin: &Origin) {
        if let Some(path) = origin.path() {
            if self.staged.remove(path).is_some() {
                tracing::debug!(%origin, "discarded staged edits");
            }
        }
    }
}
