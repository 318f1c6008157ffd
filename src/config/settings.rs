//! User settings for Spendwise
//!
//! Settings live in `config.json` under the base directory. Every field has a
//! default so older files keep loading. [`Settings::resolve`] turns the
//! stored preferences into the explicit [`AppConfig`] the rest of the
//! application is wired with.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::SpendwisePaths;
use crate::error::SpendwiseError;

/// How long an over-budget alert stays "the same" alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertScope {
    /// Alert text names the month, so each month can alert once per category
    #[default]
    Period,
    /// Alert text has no month marker; a category alerts once until cleared
    Lifetime,
}

/// User settings for Spendwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts (SMS parsing always looks for "Rs")
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Owner used when none is given on the command line
    #[serde(default = "default_owner")]
    pub default_owner: String,

    /// Alert deduplication scope
    #[serde(default)]
    pub alert_scope: AlertScope,

    /// Override for the transaction/budget/alert store directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_location: Option<PathBuf>,

    /// Override for the trained model artifact path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_artifact_path: Option<PathBuf>,

    /// Override for the labeled dataset path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "Rs.".to_string()
}

fn default_owner() -> String {
    "demo".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_owner: default_owner(),
            alert_scope: AlertScope::default(),
            store_location: None,
            model_artifact_path: None,
            dataset_path: None,
        }
    }
}

/// Fully resolved configuration handed to the application entry point
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_location: PathBuf,
    pub model_artifact_path: PathBuf,
    pub dataset_path: PathBuf,
    pub currency_symbol: String,
    pub alert_scope: AlertScope,
}

impl AppConfig {
    /// Path of the append-only audit log (kept alongside the store)
    pub fn audit_log_path(&self) -> PathBuf {
        self.store_location.join("audit.log")
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SpendwisePaths) -> Result<Self, SpendwiseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SpendwiseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendwiseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendwisePaths) -> Result<(), SpendwiseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SpendwiseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            SpendwiseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Resolve overrides against the default paths
    pub fn resolve(&self, paths: &SpendwisePaths) -> AppConfig {
        AppConfig {
            store_location: self
                .store_location
                .clone()
                .unwrap_or_else(|| paths.data_dir()),
            model_artifact_path: self
                .model_artifact_path
                .clone()
                .unwrap_or_else(|| paths.model_file()),
            dataset_path: self
                .dataset_path
                .clone()
                .unwrap_or_else(|| paths.dataset_file()),
            currency_symbol: self.currency_symbol.clone(),
            alert_scope: self.alert_scope,
        }
    }
}
