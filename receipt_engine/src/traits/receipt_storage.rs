use std::{fmt::Display, path::PathBuf};

use thiserror::Error;

use crate::storage::ReceiptStore;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("I/O error in the receipt store. {0}")]
    Io(String),
    #[error("Could not serialize the receipt store. {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// The persisted store could not be parsed and was replaced by an empty one. Whatever it held is lost once the
/// store is written again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageCorruption {
    pub path: PathBuf,
    pub reason: String,
}

impl Display for StorageCorruption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} was corrupted and is being replaced by an empty store. {}", self.path.display(), self.reason)
    }
}

/// The result of loading the receipt store.
#[derive(Debug, Clone, Default)]
pub struct LoadedStore {
    pub store: ReceiptStore,
    pub warning: Option<StorageCorruption>,
}

pub trait ReceiptStorage {
    /// Read the full store. A store that does not exist yet is empty; a store that cannot be parsed is empty too, but
    /// comes with a [`StorageCorruption`] warning.
    fn load(&self) -> Result<LoadedStore, StoreError>;
    /// Replace the persisted store with `store`.
    fn persist(&self, store: &ReceiptStore) -> Result<(), StoreError>;
}
