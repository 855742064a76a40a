use std::{env, path::PathBuf};

pub const DEFAULT_STORAGE_FILE: &str = "receipts.json";

/// Examines the environment configuration to determine where the receipt store lives.
pub fn storage_path_from_env() -> PathBuf {
    env::var("VRS_STORAGE_FILE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_FILE))
}
