//! Document serialization and deserialization using `MessagePack`.
//!
//! This module provides functions for saving and loading template and
//! aggregate documents to/from files using the `MessagePack` binary format.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use reforge_foundation::{Error, ErrorKind, Result};
use reforge_storage::Document;

/// Serializes a document to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(document: &Document) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(document)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a document from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Document> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Saves a document to a file using `MessagePack` format.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
    let bytes = to_bytes(document)?;
    let file = File::create(path.as_ref()).map_err(|e| io_error("create", path.as_ref(), &e))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path.as_ref(), &e))?;
    writer
        .flush()
        .map_err(|e| io_error("flush", path.as_ref(), &e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| io_error("sync", path.as_ref(), &e))?;

    Ok(())
}

/// Loads a document from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let file = File::open(path.as_ref()).map_err(|e| io_error("open", path.as_ref(), &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path.as_ref(), &e))?;

    from_bytes(&bytes)
}

pub(crate) fn io_error(action: &str, path: &Path, err: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} '{}': {err}",
        path.display()
    )))
}
