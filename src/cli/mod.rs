//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod alert;
pub mod audit;
pub mod budget;
pub mod model;
pub mod report;
pub mod transaction;

pub use alert::{handle_alert_command, AlertCommands};
pub use audit::{handle_audit_command, AuditArgs};
pub use budget::{handle_budget_command, BudgetCommands};
pub use model::{handle_model_command, ModelCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Category, Money};

/// Parse a user-typed amount
pub(crate) fn parse_amount(input: &str) -> SpendwiseResult<Money> {
    Money::parse(input).map_err(|e| SpendwiseError::Validation(e.to_string()))
}

/// Parse a user-typed category label
pub(crate) fn parse_category(input: &str) -> SpendwiseResult<Category> {
    Category::new(input).ok_or_else(|| SpendwiseError::Validation("category is blank".into()))
}
