//! Shared fixtures for unit tests

use tempfile::TempDir;

use crate::config::{AlertScope, AppConfig};
use crate::storage::Storage;

/// Configuration rooted entirely inside a temporary directory
pub(crate) fn test_config(temp_dir: &TempDir) -> AppConfig {
    AppConfig {
        store_location: temp_dir.path().join("data"),
        model_artifact_path: temp_dir.path().join("models").join("txn_clf.json"),
        dataset_path: temp_dir.path().join("labeled_transactions.csv"),
        currency_symbol: "Rs.".to_string(),
        alert_scope: AlertScope::Period,
    }
}

/// Open and load an empty store
pub(crate) fn loaded_storage(temp_dir: &TempDir) -> Storage {
    let mut storage = Storage::open(&test_config(temp_dir)).unwrap();
    storage.load_all().unwrap();
    storage
}
