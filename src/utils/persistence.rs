use std::{fs, path::Path};

use thiserror::Error;

use crate::ledger::LedgerSnapshot;

/// Failures while persisting or reloading a ledger snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_file(snapshot: &LedgerSnapshot, path: &Path) -> Result<(), StorageError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a snapshot from disk, returning structured errors on failure.
pub fn load_snapshot_from_file(path: &Path) -> Result<LedgerSnapshot, StorageError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
