//! Core values, identifiers, and errors for Reforge.
//!
//! This crate provides:
//! - [`Value`] and [`Fields`] - Component field data
//! - [`ObjectId`] - Generational object identifiers
//! - [`ComponentTag`] - Component type tags
//! - [`Type`] - Type descriptors for field schemas
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod object;
pub mod tag;
pub mod types;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use error::{Error, ErrorContext, ErrorKind};
pub use object::ObjectId;
pub use tag::ComponentTag;
pub use types::Type;
pub use value::{Fields, Value, fields};

/// Result type alias using the Reforge error type.
pub type Result<T> = std::result::Result<T, Error>;
