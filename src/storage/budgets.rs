//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json. Budgets are keyed by
//! (owner, category), so there is never more than one per pair.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendwiseError;
use crate::models::{Budget, Category, OwnerRef};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Composite key for budgets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub owner: OwnerRef,
    pub category: Category,
}

impl BudgetKey {
    pub fn new(owner: OwnerRef, category: Category) -> Self {
        Self { owner, category }
    }

    fn of(budget: &Budget) -> Self {
        Self::new(budget.owner.clone(), budget.category.clone())
    }
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetKey, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    ///
    /// If the file holds duplicates for one (owner, category), the last wins.
    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(BudgetKey::of(&budget), budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), SpendwiseError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| a.owner.cmp(&b.owner).then(a.category.cmp(&b.category)));

        write_json_atomic(&self.path, &BudgetData { budgets: list })
    }

    /// Get the budget for an owner and category
    pub fn get(
        &self,
        owner: &OwnerRef,
        category: &Category,
    ) -> Result<Option<Budget>, SpendwiseError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let key = BudgetKey::new(owner.clone(), category.clone());
        Ok(budgets.get(&key).cloned())
    }

    /// Get all budgets for an owner, sorted by category
    pub fn get_for_owner(&self, owner: &OwnerRef) -> Result<Vec<Budget>, SpendwiseError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| &b.owner == owner)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(list)
    }

    /// Insert or replace a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), SpendwiseError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(BudgetKey::of(&budget), budget);
        Ok(())
    }

    /// Count all budgets
    pub fn count(&self) -> Result<usize, SpendwiseError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        (temp_dir, BudgetRepository::new(path))
    }

    fn budget(owner: &str, category: &str, limit: i64) -> Budget {
        Budget::new(
            OwnerRef::new(owner).unwrap(),
            Category::new(category).unwrap(),
            Money::from_units(limit),
        )
    }

    #[test]
    fn test_upsert_overwrites_same_key() {
        let (_temp, repo) = create_test_repo();

        repo.upsert(budget("alice", "Food", 1000)).unwrap();
        repo.upsert(budget("alice", "Food", 1500)).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        let stored = repo
            .get(&OwnerRef::new("alice").unwrap(), &Category::new("Food").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(stored.monthly_limit, Money::from_units(1500));
    }

    #[test]
    fn test_get_for_owner_is_scoped_and_sorted() {
        let (_temp, repo) = create_test_repo();

        repo.upsert(budget("alice", "Travel", 500)).unwrap();
        repo.upsert(budget("alice", "Bills", 900)).unwrap();
        repo.upsert(budget("bob", "Food", 100)).unwrap();

        let alice = repo.get_for_owner(&OwnerRef::new("alice").unwrap()).unwrap();
        let categories: Vec<_> = alice.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(categories, vec!["Bills", "Travel"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp, repo) = create_test_repo();
        repo.upsert(budget("alice", "Food", 1000)).unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(temp.path().join("budgets.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
    }
}
