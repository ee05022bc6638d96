//! Persisted documents and the backends that hold them.
//!
//! A document is the unit of persistence for templates and aggregates: it
//! is always read and written whole. Objects inside a document have ids
//! local to that document.

use std::collections::{HashMap, HashSet};
use std::fmt;

use reforge_foundation::{Error, ErrorKind, Fields, LtVec, ObjectId, Result, Value};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentSet};
use crate::object::Object;

/// What a document represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DocumentKind {
    /// A single-root reusable object.
    Template,
    /// A named collection of root objects.
    Aggregate,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => write!(f, "template"),
            Self::Aggregate => write!(f, "aggregate"),
        }
    }
}

/// A template or aggregate as persisted by a backend.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    /// Location of the document in its backend.
    pub path: String,
    /// Template or aggregate.
    pub kind: DocumentKind,
    /// Root objects in order.
    roots: Vec<Object>,
}

impl Document {
    /// Captures copies of `objects` into a new document.
    ///
    /// Objects are renumbered with document-local ids. An object listed more
    /// than once is captured at its first position only. References between
    /// captured objects follow the renumbering; references to anything
    /// outside the document become nil.
    #[must_use]
    pub fn capture<'a>(
        path: impl Into<String>,
        kind: DocumentKind,
        objects: impl IntoIterator<Item = &'a Object>,
    ) -> Self {
        let mut seen = HashSet::new();
        let objects: Vec<&Object> = objects
            .into_iter()
            .filter(|obj| seen.insert(obj.id))
            .collect();
        let ids: HashMap<ObjectId, ObjectId> = objects
            .iter()
            .enumerate()
            .map(|(i, obj)| (obj.id, ObjectId::new(i as u64, 1)))
            .collect();

        let roots = objects
            .iter()
            .map(|obj| Object {
                id: ids[&obj.id],
                name: obj.name.clone(),
                components: obj
                    .components
                    .iter()
                    .map(|c| Component::with_fields(c.tag.clone(), remap_fields(&c.fields, &ids)))
                    .collect::<ComponentSet>(),
            })
            .collect();

        Self {
            path: path.into(),
            kind,
            roots,
        }
    }

    /// Returns the root objects.
    #[must_use]
    pub fn roots(&self) -> &[Object] {
        &self.roots
    }

    /// Returns a root object by id.
    #[must_use]
    pub fn root(&self, id: ObjectId) -> Option<&Object> {
        self.roots.iter().find(|o| o.id == id)
    }

    /// Returns a mutable root object by id.
    pub fn root_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.roots.iter_mut().find(|o| o.id == id)
    }
}

fn remap_fields(fields: &Fields, ids: &HashMap<ObjectId, ObjectId>) -> Fields {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), remap_value(v, ids)))
        .collect()
}

fn remap_value(value: &Value, ids: &HashMap<ObjectId, ObjectId>) -> Value {
    match value {
        Value::Ref(id) => ids.get(id).map_or(Value::Nil, |new| Value::Ref(*new)),
        Value::Vec(items) => Value::Vec(
            items
                .iter()
                .map(|v| remap_value(v, ids))
                .collect::<LtVec<_>>(),
        ),
        Value::Map(fields) => Value::Map(remap_fields(fields, ids)),
        other => other.clone(),
    }
}

/// Storage for documents.
///
/// Writes replace the whole document; implementations must not leave a
/// partially written document visible to later reads.
pub trait DocumentBackend {
    /// Reads a document. Returns `None` if no document exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read.
    fn read(&self, path: &str) -> Result<Option<Document>>;

    /// Writes a document, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn write(&mut self, document: &Document) -> Result<()>;

    /// Deletes a document. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be deleted.
    fn delete(&mut self, path: &str) -> Result<bool>;

    /// Lists the paths of all stored documents, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be enumerated.
    fn paths(&self) -> Result<Vec<String>>;
}

/// In-memory document backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    documents: HashMap<String, Document>,
    read_only: bool,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write and delete fail.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn check_writable(&self, path: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::new(ErrorKind::IoError(format!(
                "backend is read-only, cannot modify '{path}'"
            ))));
        }
        Ok(())
    }
}

impl DocumentBackend for MemoryBackend {
    fn read(&self, path: &str) -> Result<Option<Document>> {
        Ok(self.documents.get(path).cloned())
    }

    fn write(&mut self, document: &Document) -> Result<()> {
        self.check_writable(&document.path)?;
        self.documents
            .insert(document.path.clone(), document.clone());
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<bool> {
        self.check_writable(path)?;
        Ok(self.documents.remove(path).is_some())
    }

    fn paths(&self) -> Result<Vec<String>> {
        let mut paths: Vec<_> = self.documents.keys().cloned().collect();
        paths.sort();
        Ok(paths)
    }
}
