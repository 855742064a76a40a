use std::path::PathBuf;

use log::*;
use tempfile::TempDir;

pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
}

/// A fresh directory for a receipt store. The directory is removed when the returned guard is dropped.
pub fn temp_store_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Error creating temporary directory");
    let path = dir.path().join("receipts.json");
    (dir, path)
}
