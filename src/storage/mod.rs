//! Storage layer for Spendwise
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. This is the local stand-in for the transaction/budget/alert
//! store; the alert engine reaches it through [`SpendStore`].

pub mod alerts;
pub mod budgets;
pub mod file_io;
pub mod transactions;

pub use alerts::AlertRepository;
pub use budgets::{BudgetKey, BudgetRepository};
pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use transactions::TransactionRepository;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::AppConfig;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Alert, Budget, Category, Money, OwnerRef};
use crate::services::alert::SpendStore;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    root: PathBuf,
    loaded: bool,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub alerts: AlertRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage instance rooted at the configured store location
    pub fn open(config: &AppConfig) -> Result<Self, SpendwiseError> {
        let root = config.store_location.clone();
        std::fs::create_dir_all(&root)
            .map_err(|e| SpendwiseError::Io(format!("Failed to create store directory: {}", e)))?;

        Ok(Self {
            transactions: TransactionRepository::new(root.join("transactions.json")),
            budgets: BudgetRepository::new(root.join("budgets.json")),
            alerts: AlertRepository::new(root.join("alerts.json")),
            audit: AuditLogger::new(config.audit_log_path()),
            loaded: false,
            root,
        })
    }

    /// Directory holding the store files
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SpendwiseError> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.alerts.load()?;
        self.loaded = true;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendwiseError> {
        self.transactions.save()?;
        self.budgets.save()?;
        self.alerts.save()?;
        Ok(())
    }

    /// Whether [`Storage::load_all`] has completed
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: &OwnerRef,
        entity: &T,
    ) -> SpendwiseResult<()> {
        self.audit.log(&AuditEntry::create(
            entity_type,
            entity_id,
            Some(owner),
            entity,
        ))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: &OwnerRef,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> SpendwiseResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            Some(owner),
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: &OwnerRef,
        entity: &T,
    ) -> SpendwiseResult<()> {
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id,
            Some(owner),
            entity,
        ))
    }

    fn ensure_loaded(&self) -> SpendwiseResult<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(SpendwiseError::Dependency(format!(
                "store at {} has not been loaded",
                self.root.display()
            )))
        }
    }
}

impl SpendStore for Storage {
    fn budgets_for(&self, owner: &OwnerRef) -> SpendwiseResult<Vec<Budget>> {
        self.ensure_loaded()?;
        self.budgets.get_for_owner(owner)
    }

    fn spent_in_window(
        &self,
        owner: &OwnerRef,
        category: &Category,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> SpendwiseResult<Money> {
        self.ensure_loaded()?;
        self.transactions.sum_in_window(owner, category, since, until)
    }

    fn has_alert_text(&self, owner: &OwnerRef, text: &str) -> SpendwiseResult<bool> {
        self.ensure_loaded()?;
        self.alerts.contains_text(owner, text)
    }

    fn insert_alert(&self, alert: Alert) -> SpendwiseResult<()> {
        self.ensure_loaded()?;
        self.alerts.insert(alert)
    }

    fn commit_alerts(&self, created: &[Alert]) -> SpendwiseResult<()> {
        self.alerts.save()?;
        for alert in created {
            self.log_create(EntityType::Alert, alert.id.to_string(), &alert.owner, alert)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_config;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(&test_config(&temp_dir)).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_loaded());
    }

    #[test]
    fn test_unloaded_store_is_dependency_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(&test_config(&temp_dir)).unwrap();

        let err = storage
            .budgets_for(&OwnerRef::new("alice").unwrap())
            .unwrap_err();
        assert!(err.is_dependency());
    }

    #[test]
    fn test_corrupt_store_fails_to_load() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut storage = Storage::open(&config).unwrap();
        std::fs::write(config.store_location.join("budgets.json"), "{ nope").unwrap();

        assert!(storage.load_all().is_err());
        assert!(!storage.is_loaded());
    }

    #[test]
    fn test_alert_is_audited_on_commit() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = Storage::open(&test_config(&temp_dir)).unwrap();
        storage.load_all().unwrap();

        let owner = OwnerRef::new("alice").unwrap();
        let alert = Alert::over_budget(
            owner.clone(),
            "over",
            Category::new("Food").unwrap(),
            crate::models::MonthPeriod::new(2025, 1).unwrap(),
            Utc::now(),
        );
        storage.insert_alert(alert.clone()).unwrap();
        assert!(storage.audit().read_all().unwrap().is_empty());

        storage.commit_alerts(&[alert]).unwrap();
        assert!(storage.has_alert_text(&owner, "over").unwrap());
        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type, EntityType::Alert);
    }

    #[test]
    fn test_failed_alert_commit_is_not_audited() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut storage = Storage::open(&config).unwrap();
        storage.load_all().unwrap();
        // A directory in place of the alerts file makes the atomic rename fail
        std::fs::create_dir(config.store_location.join("alerts.json")).unwrap();

        let owner = OwnerRef::new("alice").unwrap();
        let alert = Alert::over_budget(
            owner,
            "over",
            Category::new("Food").unwrap(),
            crate::models::MonthPeriod::new(2025, 1).unwrap(),
            Utc::now(),
        );
        storage.insert_alert(alert.clone()).unwrap();

        assert!(storage.commit_alerts(&[alert]).is_err());
        assert!(storage.audit().read_all().unwrap().is_empty());
    }
}
