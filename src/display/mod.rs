//! Display formatting for terminal output
//!
//! Formats transactions, budgets, and alerts as plain-text tables. Amounts
//! are printed with the configured currency symbol.

pub mod alert;
pub mod budget;
pub mod transaction;

pub use alert::format_alert_list;
pub use budget::{format_budget_list, format_budget_status};
pub use transaction::{format_transaction_details, format_transaction_register};

/// Pad or cut a string to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
