//! Audit logger for append-only audit log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::OwnerRef;

use super::entry::AuditEntry;

/// Handles writing audit entries to the audit log file (JSONL)
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    fn open_for_append(&self) -> SpendwiseResult<File> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SpendwiseError::Io(format!("Failed to create audit directory: {}", e)))?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SpendwiseError::Io(format!("Failed to open audit log: {}", e)))
    }

    /// Append an entry and flush
    pub fn log(&self, entry: &AuditEntry) -> SpendwiseResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries, flushing once at the end
    pub fn log_batch(&self, entries: &[AuditEntry]) -> SpendwiseResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = self.open_for_append()?;

        for entry in entries {
            let json = serde_json::to_string(entry).map_err(|e| {
                SpendwiseError::Json(format!("Failed to serialize audit entry: {}", e))
            })?;

            writeln!(file, "{}", json)
                .map_err(|e| SpendwiseError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| SpendwiseError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> SpendwiseResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| SpendwiseError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                SpendwiseError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                SpendwiseError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries `owner` may see, oldest first
    pub fn read_recent(&self, owner: &OwnerRef, count: usize) -> SpendwiseResult<Vec<AuditEntry>> {
        let mut visible: Vec<_> = self
            .read_all()?
            .into_iter()
            .filter(|entry| entry.visible_to(owner))
            .collect();
        let start = visible.len().saturating_sub(count);
        Ok(visible.split_off(start))
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn alice() -> OwnerRef {
        OwnerRef::new("alice").unwrap()
    }

    fn entry(i: usize) -> AuditEntry {
        AuditEntry::create(
            EntityType::Transaction,
            format!("txn-{}", i),
            Some(&alice()),
            &json!({"index": i}),
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry(0)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Transaction);
    }

    #[test]
    fn test_log_batch_and_read_recent() {
        let (logger, _temp) = create_test_logger();

        let entries: Vec<_> = (0..10).map(entry).collect();
        logger.log_batch(&entries).unwrap();

        let recent = logger.read_recent(&alice(), 3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].entity_id, "txn-7");
        assert_eq!(recent[2].entity_id, "txn-9");
    }

    #[test]
    fn test_read_recent_hides_other_owners() {
        let (logger, _temp) = create_test_logger();
        let bob = OwnerRef::new("bob").unwrap();

        logger.log(&entry(1)).unwrap();
        logger
            .log(&AuditEntry::create(EntityType::Budget, "bob:Food", Some(&bob), &json!({})))
            .unwrap();
        logger
            .log(&AuditEntry::create(EntityType::Model, "txn_clf.json", None, &json!({})))
            .unwrap();

        let ids: Vec<_> = logger
            .read_recent(&alice(), 10)
            .unwrap()
            .into_iter()
            .map(|e| e.entity_id)
            .collect();
        assert_eq!(ids, vec!["txn-1", "txn_clf.json"]);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let temp = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp.path().join("store").join("audit.log"));
        logger.log(&entry(1)).unwrap();
        assert!(logger.path().exists());
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&entry(1)).unwrap();

        let logger2 = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(logger2.read_all().unwrap().len(), 1);
    }
}
