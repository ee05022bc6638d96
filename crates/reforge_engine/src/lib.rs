//! Migration queue, handlers, registry, and migrator for Reforge.
//!
//! This crate provides:
//! - [`MigrationQueue`] - Objects queued for migration
//! - [`MigrationHandler`] and [`MappedHandler`] - Legacy to replacement mappings
//! - [`LegacyKind`] - The built-in legacy component types
//! - [`HandlerRegistry`] - Handlers keyed by legacy component tag
//! - [`Migrator`] - Applies handlers to queued objects and persists results
//! - [`MigrationReport`] - Per-object outcomes of a run

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod confirm;
pub mod handler;
pub mod handlers;
pub mod migrator;
pub mod queue;
pub mod registry;
pub mod report;

pub use config::MigrationConfig;
pub use confirm::{Confirm, ConfirmRequest, Decision};
pub use handler::{Convert, FieldRule, MappedHandler, MigrationHandler};
pub use handlers::LegacyKind;
pub use migrator::Migrator;
pub use queue::MigrationQueue;
pub use registry::HandlerRegistry;
pub use report::{FieldChange, MigrationReport, ObjectReport, Outcome, Replacement, Summary};
