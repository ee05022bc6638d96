//! Reforge - Component migration toolkit
//!
//! This crate re-exports all layers of the Reforge system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: reforge_runtime     - Document files, prompts, CLI
//! Layer 2: reforge_engine      - Queue, handlers, registry, migrator, reports
//! Layer 1: reforge_storage     - Objects, components, documents, object store
//! Layer 0: reforge_foundation  - Core types (Value, ObjectId, Error)
//! ```

pub use reforge_engine as engine;
pub use reforge_foundation as foundation;
pub use reforge_runtime as runtime;
pub use reforge_storage as storage;
