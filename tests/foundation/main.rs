//! Integration tests for Layer 0: Foundation
//!
//! Tests for values, types, persistent collections, identifiers, and errors.

mod errors;
mod values;
