//! Service layer for Spendwise
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, auditing, and the alert check that follows every
//! new transaction.

pub mod alert;
pub mod budget;
pub mod transaction;

pub use alert::{alert_text, AlertEngine, AlertService, SpendStore};
pub use budget::BudgetService;
pub use transaction::{Recorded, TransactionService, DEFAULT_LIST_LIMIT};
