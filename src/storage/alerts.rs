//! Alert repository for JSON storage
//!
//! Manages loading and saving alerts to alerts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendwiseError;
use crate::models::{Alert, OwnerRef};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AlertData {
    #[serde(default)]
    alerts: Vec<Alert>,
}

/// Repository for alert persistence, grouped by owner
pub struct AlertRepository {
    path: PathBuf,
    by_owner: RwLock<HashMap<OwnerRef, Vec<Alert>>>,
}

impl AlertRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            by_owner: RwLock::new(HashMap::new()),
        }
    }

    /// Load alerts from disk
    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: AlertData = read_json(&self.path)?;

        let mut by_owner = self
            .by_owner
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        by_owner.clear();
        for alert in file_data.alerts {
            by_owner.entry(alert.owner.clone()).or_default().push(alert);
        }

        Ok(())
    }

    /// Save alerts to disk
    pub fn save(&self) -> Result<(), SpendwiseError> {
        let by_owner = self
            .by_owner
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut alerts: Vec<_> = by_owner.values().flatten().cloned().collect();
        alerts.sort_by(|a, b| a.owner.cmp(&b.owner).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &AlertData { alerts })
    }

    /// Get an owner's alerts, newest first
    pub fn get_for_owner(&self, owner: &OwnerRef) -> Result<Vec<Alert>, SpendwiseError> {
        let by_owner = self
            .by_owner
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut alerts = by_owner.get(owner).cloned().unwrap_or_default();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }

    /// Check whether an owner already has an alert with byte-identical text
    pub fn contains_text(&self, owner: &OwnerRef, text: &str) -> Result<bool, SpendwiseError> {
        let by_owner = self
            .by_owner
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_owner
            .get(owner)
            .is_some_and(|alerts| alerts.iter().any(|a| a.text == text)))
    }

    /// Add an alert
    pub fn insert(&self, alert: Alert) -> Result<(), SpendwiseError> {
        let mut by_owner = self
            .by_owner
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        by_owner.entry(alert.owner.clone()).or_default().push(alert);
        Ok(())
    }

    /// Remove every alert of an owner, returning what was removed
    pub fn remove_for_owner(&self, owner: &OwnerRef) -> Result<Vec<Alert>, SpendwiseError> {
        let mut by_owner = self
            .by_owner
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(by_owner.remove(owner).unwrap_or_default())
    }
}
