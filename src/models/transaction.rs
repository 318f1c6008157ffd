//! Transaction model
//!
//! A transaction is a categorized spend owned by one user. Transactions are
//! immutable once recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{OwnerRef, TransactionId};
use super::money::Money;

/// How a transaction's category was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    /// Keyword rules applied to SMS text
    #[default]
    SmsRules,
    /// Trained text classifier
    Classifier,
    /// Keyword rules used because no model was loaded
    RulesFallback,
    /// Category supplied by the user
    Manual,
}

impl fmt::Display for CategorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmsRules => write!(f, "sms"),
            Self::Classifier => write!(f, "model"),
            Self::RulesFallback => write!(f, "rules"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// A recorded spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The user this transaction belongs to
    pub owner: OwnerRef,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Spending category
    pub category: Category,

    /// How the category was decided
    #[serde(default)]
    pub source: CategorySource,

    /// Free-text description entered by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Full pasted SMS the transaction was parsed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_source_text: Option<String>,

    /// When the transaction happened
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction timestamped now
    pub fn new(owner: OwnerRef, amount: Money, category: Category) -> Self {
        Self {
            id: TransactionId::new(),
            owner,
            amount,
            category,
            source: CategorySource::default(),
            description: None,
            raw_source_text: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, source: CategorySource) -> Self {
        self.source = source;
        self
    }

    /// Attach a description; blank text is dropped
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    pub fn with_raw_source(mut self, raw: impl Into<String>) -> Self {
        self.raw_source_text = Some(raw.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn owner() -> OwnerRef {
        OwnerRef::new("alice").unwrap()
    }

    #[test]
    fn test_builder() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let txn = Transaction::new(owner(), Money::from_units(450), Category::new("Food").unwrap())
            .with_description("lunch")
            .with_raw_source("Rs. 450 spent at Swiggy")
            .at(ts);

        assert_eq!(txn.description.as_deref(), Some("lunch"));
        assert_eq!(txn.raw_source_text.as_deref(), Some("Rs. 450 spent at Swiggy"));
        assert_eq!(txn.timestamp, ts);
        assert_eq!(txn.source, CategorySource::SmsRules);
        assert_eq!(txn.to_string(), "2025-01-15 Food 450.00");
    }

    #[test]
    fn test_blank_description_dropped() {
        let txn = Transaction::new(owner(), Money::from_units(1), Category::others())
            .with_description("   ");
        assert!(txn.description.is_none());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let txn = Transaction::new(owner(), Money::zero(), Category::others());
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NonPositiveAmount(Money::zero()))
        );
    }

    #[test]
    fn test_serialization_skips_missing_text() {
        let txn = Transaction::new(owner(), Money::from_units(10), Category::others());
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("raw_source_text"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }
}
