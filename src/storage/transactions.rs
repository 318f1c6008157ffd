//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::error::SpendwiseError;
use crate::models::{Category, Money, OwnerRef, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with an owner index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: owner -> transaction_ids
    by_owner: RwLock<HashMap<OwnerRef, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_owner: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build indexes
    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_owner = self.by_owner.write().map_err(|e| {
            SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_owner.clear();

        for txn in file_data.transactions {
            by_owner.entry(txn.owner.clone()).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk (newest first)
    pub fn save(&self) -> Result<(), SpendwiseError> {
        let data = self.data.read().map_err(|e| {
            SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then(a.id.as_uuid().cmp(b.id.as_uuid()))
        });

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, SpendwiseError> {
        let data = self.data.read().map_err(|e| {
            SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get an owner's transactions, newest first
    pub fn get_by_owner(&self, owner: &OwnerRef) -> Result<Vec<Transaction>, SpendwiseError> {
        let data = self.data.read().map_err(|e| {
            SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_owner = self.by_owner.read().map_err(|e| {
            SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_owner.get(owner).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(transactions)
    }

    /// Get an owner's transactions with `since <= timestamp < until`
    pub fn get_in_window(
        &self,
        owner: &OwnerRef,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, SpendwiseError> {
        Ok(self
            .get_by_owner(owner)?
            .into_iter()
            .filter(|t| t.timestamp >= since && t.timestamp < until)
            .collect())
    }

    /// Sum of an owner's spend in one category with `since <= timestamp < until`
    ///
    /// A total outside the amount range is a storage error, never a wrapped value.
    pub fn sum_in_window(
        &self,
        owner: &OwnerRef,
        category: &Category,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Money, SpendwiseError> {
        self.get_in_window(owner, since, until)?
            .iter()
            .filter(|t| &t.category == category)
            .try_fold(Money::zero(), |total, t| total.checked_add(t.amount))
            .ok_or_else(|| {
                SpendwiseError::Storage(format!(
                    "{} spend for {} exceeds the supported amount range",
                    category, owner
                ))
            })
    }

    /// Insert a transaction
    ///
    /// Transactions are immutable, so inserting an existing ID is rejected.
    pub fn insert(&self, txn: Transaction) -> Result<(), SpendwiseError> {
        let mut data = self.data.write().map_err(|e| {
            SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_owner = self.by_owner.write().map_err(|e| {
            SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.contains_key(&txn.id) {
            return Err(SpendwiseError::Storage(format!(
                "Transaction {} already exists",
                txn.id
            )));
        }

        by_owner.entry(txn.owner.clone()).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, SpendwiseError> {
        let data = self.data.read().map_err(|e| {
            SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
