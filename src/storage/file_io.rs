//! JSON file helpers shared by the store and the model artifact
//!
//! Writes go through a sibling temp file that is synced and renamed into
//! place, so readers never observe a half-written document.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SpendwiseError;

fn storage_error(action: &str, path: &Path, err: impl Display) -> SpendwiseError {
    SpendwiseError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Temp file next to `path`; the rename is only atomic within one directory
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read a JSON document, or `T::default()` when the file does not exist yet
pub fn read_json<T, P>(path: P) -> Result<T, SpendwiseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.exists() {
        read_json_required(path)
    } else {
        Ok(T::default())
    }
}

/// Read a JSON document that must exist
pub fn read_json_required<T, P>(path: P) -> Result<T, SpendwiseError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with the pretty-printed JSON of `data`
///
/// Parent directories are created on demand. On failure the previous
/// contents are left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SpendwiseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_synced(&temp_path, data)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| storage_error("replace", path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_synced<T: Serialize>(path: &Path, data: &T) -> Result<(), SpendwiseError> {
    let file = File::create(path).map_err(|e| storage_error("create", path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| storage_error("serialize", path, e))?;
    writer.flush().map_err(|e| storage_error("flush", path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", path, e))
}
