//! Integration tests for Layer 1: Storage
//!
//! Tests for components, schemas, documents, and the workspace object store.

mod components;
