//! Objects, components, documents, and the object store for Reforge.
//!
//! This crate provides:
//! - [`Object`] and [`ComponentSet`] - Migratable objects and their components
//! - [`ComponentSchema`] - Field declarations for component types
//! - [`Handle`] and [`ObjectKey`] - Migration candidates and resolved objects
//! - [`Document`] and [`DocumentBackend`] - Persisted templates and aggregates
//! - [`ObjectStore`] - The store interface the migration engine works against
//! - [`Workspace`] - An object store over live instances and a document backend

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod component;
pub mod document;
pub mod handle;
pub mod object;
pub mod schema;
pub mod store;
pub mod workspace;

pub use allocator::ObjectAllocator;
pub use component::{Component, ComponentSet};
pub use document::{Document, DocumentBackend, DocumentKind, MemoryBackend};
pub use handle::{Handle, ObjectKey, Origin};
pub use object::Object;
pub use schema::{ComponentSchema, FieldSchema};
pub use store::ObjectStore;
pub use workspace::Workspace;
