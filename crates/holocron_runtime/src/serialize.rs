//! Repository snapshots using `MessagePack`.
//!
//! A snapshot holds every entity and stored edge of a loaded repository, so
//! a later start can skip seed parsing and unit normalization. Indices are
//! rebuilt on load.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use holocron_foundation::{Error, ErrorKind, Result};
use holocron_storage::{Repository, Snapshot};

/// Serializes a repository to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(repo: &Repository) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(&repo.snapshot())
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a repository from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails or the snapshot is
/// inconsistent (duplicate entities, cardinality violations).
pub fn from_bytes(bytes: &[u8]) -> Result<Repository> {
    let snapshot: Snapshot = rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))?;
    Repository::from_snapshot(snapshot)
}

/// Saves a repository snapshot to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_snapshot<P: AsRef<Path>>(repo: &Repository, path: P) -> Result<()> {
    let path = path.as_ref();
    let io_error = |action: &str, e: std::io::Error| {
        Error::new(ErrorKind::IoError(format!(
            "failed to {action} '{}': {e}",
            path.display()
        )))
    };

    let bytes = to_bytes(repo)?;
    let file = File::create(path).map_err(|e| io_error("create", e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(|e| io_error("write", e))?;
    writer.flush().map_err(|e| io_error("flush", e))?;

    info!(path = %path.display(), bytes = bytes.len(), "saved snapshot");
    Ok(())
}

/// Loads a repository from a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Repository> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to open '{}': {e}",
            path.display()
        )))
    })?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read '{}': {e}",
            path.display()
        )))
    })?;

    let repo = from_bytes(&bytes)?;
    info!(path = %path.display(), edges = repo.edge_count(), "loaded snapshot");
    Ok(repo)
}
