//! Core data models for Spendwise
//!
//! This module contains the data structures of the expense-tracking domain:
//! transactions, budgets, alerts, and the value types they are built from.

pub mod alert;
pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use alert::Alert;
pub use budget::{Budget, BudgetStatus};
pub use category::Category;
pub use ids::{AlertId, OwnerRef, TransactionId};
pub use money::Money;
pub use period::MonthPeriod;
pub use transaction::{CategorySource, Transaction};
