use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::*;
use tempfile::NamedTempFile;

use crate::{
    receipt_types::ReceiptRecord,
    storage::ReceiptStore,
    traits::{LoadedStore, ReceiptStorage, StorageCorruption, StoreError},
};

/// Keeps the receipt store as a pretty-printed JSON array in a single file.
///
/// Every save rewrites the whole document. The new content goes to a temporary file in the same directory first and
/// is then renamed over the old file, so readers see either the previous or the new store, never a partial one.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl ReceiptStorage for JsonFileStorage {
    fn load(&self) -> Result<LoadedStore, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet. Starting with an empty receipt store", self.path.display());
                return Ok(LoadedStore::default());
            },
            Err(e) => return Err(StoreError::Io(format!("Could not read {}. {e}", self.path.display()))),
        };
        match serde_json::from_str::<Vec<ReceiptRecord>>(&contents) {
            Ok(records) => {
                let store = ReceiptStore::from_records(records);
                trace!("Loaded {} receipts from {}", store.len(), self.path.display());
                Ok(LoadedStore { store, warning: None })
            },
            Err(e) => {
                let warning = StorageCorruption { path: self.path.clone(), reason: e.to_string() };
                warn!("{warning}");
                Ok(LoadedStore { store: ReceiptStore::new(), warning: Some(warning) })
            },
        }
    }

    fn persist(&self, store: &ReceiptStore) -> Result<(), StoreError> {
        let mut file = NamedTempFile::new_in(self.directory())
            .map_err(|e| StoreError::Io(format!("Could not create a temporary file. {e}")))?;
        serde_json::to_writer_pretty(&mut file, store).map_err(|e| StoreError::Serialization(e.to_string()))?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path)
            .map_err(|e| StoreError::Io(format!("Could not replace {}. {}", self.path.display(), e.error)))?;
        info!("Receipt saved to {}", self.path.display());
        Ok(())
    }
}
