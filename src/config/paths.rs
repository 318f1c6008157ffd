//! Path management for Spendwise
//!
//! Provides XDG-compliant path resolution for configuration, the data store,
//! and trained model artifacts.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDWISE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/spendwise` or `~/.config/spendwise`
//! 3. Windows: `%APPDATA%\spendwise`

use std::path::PathBuf;

use crate::error::SpendwiseError;

/// Manages the default paths used by Spendwise
#[derive(Debug, Clone)]
pub struct SpendwisePaths {
    /// Base directory for all Spendwise data
    base_dir: PathBuf,
}

impl SpendwisePaths {
    /// Create a new SpendwisePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SpendwiseError> {
        let base_dir = if let Ok(custom) = std::env::var("SPENDWISE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SpendwisePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/spendwise/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default store directory (~/.config/spendwise/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default location of the trained model artifact
    pub fn model_file(&self) -> PathBuf {
        self.base_dir.join("models").join("txn_clf.json")
    }

    /// Default location of the labeled training dataset
    pub fn dataset_file(&self) -> PathBuf {
        self.base_dir.join("labeled_transactions.csv")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SpendwiseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendwiseError::Io(format!("Failed to create base directory: {}", e)))?;
        Ok(())
    }

    /// Check if Spendwise has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SpendwiseError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("spendwise"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| SpendwiseError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("spendwise"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SpendwiseError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SpendwiseError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("spendwise"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.model_file(),
            temp_dir.path().join("models").join("txn_clf.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested");
        let paths = SpendwisePaths::with_base_dir(base.clone());

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();
        assert!(base.exists());
    }

    #[test]
    fn test_settings_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }
}
