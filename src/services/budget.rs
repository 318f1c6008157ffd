//! Budget service
//!
//! Provides business logic for budget management: setting per-category
//! monthly limits and reporting month-to-date status against them.

use chrono::{DateTime, Utc};

use crate::audit::EntityType;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Budget, BudgetStatus, Category, Money, MonthPeriod, OwnerRef};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create or overwrite the monthly limit for a category
    pub fn set_budget(
        &self,
        owner: &OwnerRef,
        category: Category,
        monthly_limit: Money,
    ) -> SpendwiseResult<Budget> {
        let existing = self.storage.budgets.get(owner, &category)?;

        let budget = match &existing {
            Some(before) => {
                let mut budget = before.clone();
                budget.set_limit(monthly_limit);
                budget
            }
            None => Budget::new(owner.clone(), category, monthly_limit),
        };

        budget
            .validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        let entity_id = format!("{}:{}", owner, budget.category);
        match existing {
            Some(before) => self.storage.log_update(
                EntityType::Budget,
                entity_id,
                owner,
                &before,
                &budget,
                Some(format!(
                    "monthly_limit: {} -> {}",
                    before.monthly_limit, budget.monthly_limit
                )),
            )?,
            None => self
                .storage
                .log_create(EntityType::Budget, entity_id, owner, &budget)?,
        }

        Ok(budget)
    }

    /// Get a single budget
    pub fn get(&self, owner: &OwnerRef, category: &Category) -> SpendwiseResult<Budget> {
        self.storage
            .budgets
            .get(owner, category)?
            .ok_or_else(|| SpendwiseError::budget_not_found(format!("{}:{}", owner, category)))
    }

    /// All of an owner's budgets, sorted by category
    pub fn list(&self, owner: &OwnerRef) -> SpendwiseResult<Vec<Budget>> {
        self.storage.budgets.get_for_owner(owner)
    }

    /// One budget with its month-to-date spend as of `now`
    pub fn show(
        &self,
        owner: &OwnerRef,
        category: &Category,
        now: DateTime<Utc>,
    ) -> SpendwiseResult<BudgetStatus> {
        let budget = self.get(owner, category)?;
        self.with_spend(owner, budget, MonthPeriod::containing(now), now)
    }

    /// Month-to-date spend for each budget as of `now`
    pub fn status(&self, owner: &OwnerRef, now: DateTime<Utc>) -> SpendwiseResult<Vec<BudgetStatus>> {
        self.status_for(owner, MonthPeriod::containing(now), now)
    }

    /// Spend for each budget in `period`
    ///
    /// A finished month counts the whole month; the running month counts up
    /// to `now`.
    pub fn status_for(
        &self,
        owner: &OwnerRef,
        period: MonthPeriod,
        now: DateTime<Utc>,
    ) -> SpendwiseResult<Vec<BudgetStatus>> {
        self.list(owner)?
            .into_iter()
            .map(|budget| self.with_spend(owner, budget, period, now))
            .collect()
    }

    fn with_spend(
        &self,
        owner: &OwnerRef,
        budget: Budget,
        period: MonthPeriod,
        now: DateTime<Utc>,
    ) -> SpendwiseResult<BudgetStatus> {
        let until = if period.contains(now) { now } else { period.end() };
        let spent = self
            .storage
            .transactions
            .sum_in_window(owner, &budget.category, period.start(), until)?;
        Ok(BudgetStatus { budget, spent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::Transaction;
    use crate::test_utils::loaded_storage;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn alice() -> OwnerRef {
        OwnerRef::new("alice").unwrap()
    }

    fn food() -> Category {
        Category::new("Food").unwrap()
    }

    #[test]
    fn test_set_budget_creates() {
        let temp = TempDir::new().unwrap();
        let storage = loaded_storage(&temp);
        let service = BudgetService::new(&storage);

        let budget = service
            .set_budget(&alice(), food(), Money::from_units(1000))
            .unwrap();
        assert_eq!(budget.monthly_limit, Money::from_units(1000));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
    }

    #[test]
    fn test_set_budget_overwrites() {
        let temp = TempDir::new().unwrap();
        let storage = loaded_storage(&temp);
        let service = BudgetService::new(&storage);

        service.set_budget(&alice(), food(), Money::from_units(1000)).unwrap();
        service.set_budget(&alice(), food(), Money::from_units(1500)).unwrap();

        let budgets = service.list(&alice()).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].monthly_limit, Money::from_units(1500));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries[1].operation, Operation::Update);
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("monthly_limit: 1000.00 -> 1500.00")
        );
    }

    #[test]
    fn test_non_positive_limit_rejected() {
        let temp = TempDir::new().unwrap();
        let storage = loaded_storage(&temp);
        let service = BudgetService::new(&storage);

        let err = service.set_budget(&alice(), food(), Money::zero()).unwrap_err();
        assert!(err.is_validation());
        assert!(service.list(&alice()).unwrap().is_empty());
    }

    #[test]
    fn test_get_missing_budget() {
        let temp = TempDir::new().unwrap();
        let storage = loaded_storage(&temp);
        let service = BudgetService::new(&storage);

        assert!(service.get(&alice(), &food()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_status_uses_current_month() {
        let temp = TempDir::new().unwrap();
        let storage = loaded_storage(&temp);
        let service = BudgetService::new(&storage);
        service.set_budget(&alice(), food(), Money::from_units(1000)).unwrap();

        let march = Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap();
        let february = Utc.with_ymd_and_hms(2025, 2, 20, 9, 0, 0).unwrap();
        for (units, when) in [(700, march), (600, march), (900, february)] {
            storage
                .transactions
                .insert(Transaction::new(alice(), Money::from_units(units), food()).at(when))
                .unwrap();
        }

        let now = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let status = service.status(&alice(), now).unwrap();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].spent, Money::from_units(1300));
        assert_eq!(status[0].remaining(), Money::from_units(-300));
        assert!(status[0].is_over());

        let past = service
            .status_for(&alice(), MonthPeriod::new(2025, 2).unwrap(), now)
            .unwrap();
        assert_eq!(past[0].spent, Money::from_units(900));
        assert!(!past[0].is_over());
    }

    #[test]
    fn test_show_single_budget() {
        let temp = TempDir::new().unwrap();
        let storage = loaded_storage(&temp);
        let service = BudgetService::new(&storage);
        service.set_budget(&alice(), food(), Money::from_units(1000)).unwrap();

        let when = Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap();
        storage
            .transactions
            .insert(Transaction::new(alice(), Money::from_units(250), food()).at(when))
            .unwrap();

        let now = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let shown = service.show(&alice(), &food(), now).unwrap();
        assert_eq!(shown.budget.category, food());
        assert_eq!(shown.spent, Money::from_units(250));

        let travel = Category::new("Travel").unwrap();
        assert!(service.show(&alice(), &travel, now).unwrap_err().is_not_found());
    }
}
