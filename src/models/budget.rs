//! Budget model
//!
//! A monthly spending ceiling for one category of one user. There is at most
//! one budget per (owner, category); setting it again replaces the limit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::OwnerRef;
use super::money::Money;

/// A per-category monthly budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The user this budget belongs to
    pub owner: OwnerRef,

    /// The category this budget caps
    pub category: Category,

    /// Maximum spend per calendar month
    pub monthly_limit: Money,

    /// When this budget was created
    pub created_at: DateTime<Utc>,

    /// When the limit was last changed
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(owner: OwnerRef, category: Category, monthly_limit: Money) -> Self {
        let now = Utc::now();
        Self {
            owner,
            category,
            monthly_limit,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the monthly limit
    pub fn set_limit(&mut self, monthly_limit: Money) {
        self.monthly_limit = monthly_limit;
        self.updated_at = Utc::now();
    }

    /// Check whether a month-to-date spend breaks this budget
    pub fn is_exceeded_by(&self, spent: Money) -> bool {
        spent > self.monthly_limit
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.monthly_limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.monthly_limit));
        }
        Ok(())
    }
}

/// Budget together with month-to-date spend
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: Money,
}

impl BudgetStatus {
    pub fn remaining(&self) -> Money {
        self.budget.monthly_limit - self.spent
    }

    pub fn is_over(&self) -> bool {
        self.budget.is_exceeded_by(self.spent)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(limit) => {
                write!(f, "Monthly limit must be positive, got {}", limit)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn food_budget(limit: i64) -> Budget {
        Budget::new(
            OwnerRef::new("alice").unwrap(),
            Category::new("Food").unwrap(),
            Money::from_units(limit),
        )
    }

    #[test]
    fn test_exceeded_is_strict() {
        let budget = food_budget(1000);
        assert!(!budget.is_exceeded_by(Money::from_units(1000)));
        assert!(budget.is_exceeded_by(Money::from_cents(100_001)));
    }

    #[test]
    fn test_set_limit_touches_updated_at() {
        let mut budget = food_budget(1000);
        let created = budget.created_at;
        budget.set_limit(Money::from_units(1500));
        assert_eq!(budget.monthly_limit, Money::from_units(1500));
        assert_eq!(budget.created_at, created);
        assert!(budget.updated_at >= created);
    }

    #[test]
    fn test_validate() {
        assert!(food_budget(1).validate().is_ok());
        assert!(food_budget(0).validate().is_err());
        assert!(food_budget(-5).validate().is_err());
    }

    #[test]
    fn test_status() {
        let status = BudgetStatus {
            budget: food_budget(1000),
            spent: Money::from_units(1200),
        };
        assert!(status.is_over());
        assert_eq!(status.remaining(), Money::from_units(-200));
    }
}
