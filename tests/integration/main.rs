//! Integration tests for full migration runs
//!
//! Tests end-to-end migration of instances, templates, and aggregates, dry
//! runs, and runs over document files on disk.

mod dry_run;
mod scenarios;
