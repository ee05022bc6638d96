//! Handles to migration candidates and keys of resolved objects.

use std::fmt;
use std::sync::Arc;

use reforge_foundation::ObjectId;

/// A migration candidate as supplied by the caller.
///
/// A handle may name one object (an instance or a single aggregate root) or
/// a whole document (a template or every root of an aggregate).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// A live instance.
    Instance(ObjectId),
    /// A template document by path.
    Template(Arc<str>),
    /// Every root object of an aggregate document.
    Aggregate(Arc<str>),
    /// A single root object inside an aggregate document.
    AggregateRoot {
        /// Aggregate document path.
        path: Arc<str>,
        /// Root object within the aggregate.
        root: ObjectId,
    },
}

impl Handle {
    /// Creates a template handle.
    #[must_use]
    pub fn template(path: &str) -> Self {
        Self::Template(Arc::from(path))
    }

    /// Creates an aggregate handle.
    #[must_use]
    pub fn aggregate(path: &str) -> Self {
        Self::Aggregate(Arc::from(path))
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(id) => write!(f, "instance {id}"),
            Self::Template(path) => write!(f, "template {path}"),
            Self::Aggregate(path) => write!(f, "aggregate {path}"),
            Self::AggregateRoot { path, root } => write!(f, "aggregate {path} {root}"),
        }
    }
}

impl From<ObjectId> for Handle {
    fn from(id: ObjectId) -> Self {
        Self::Instance(id)
    }
}

/// The backing representation an object is persisted through.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Live instances, mutated in place.
    Instance,
    /// A template document.
    Template(Arc<str>),
    /// An aggregate document.
    Aggregate(Arc<str>),
}

impl Origin {
    /// Returns the document path, if the origin is a document.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Instance => None,
            Self::Template(path) | Self::Aggregate(path) => Some(path),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance => write!(f, "instances"),
            Self::Template(path) => write!(f, "template {path}"),
            Self::Aggregate(path) => write!(f, "aggregate {path}"),
        }
    }
}

/// Identity of one resolved object: where it lives and its id there.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    /// Backing representation.
    pub origin: Origin,
    /// Object id within that representation.
    pub id: ObjectId,
}

impl ObjectKey {
    /// Creates a key for a live instance.
    #[must_use]
    pub const fn instance(id: ObjectId) -> Self {
        Self {
            origin: Origin::Instance,
            id,
        }
    }

    /// Creates a key for an object inside a document.
    #[must_use]
    pub const fn new(origin: Origin, id: ObjectId) -> Self {
        Self { origin, id }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Origin::Instance => write!(f, "instance {}", self.id),
            origin => write!(f, "{origin} {}", self.id),
        }
    }
}
