//! Transaction display formatting

use super::truncate;
use crate::models::Transaction;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, currency_symbol: &str) -> String {
    let label = txn
        .description
        .as_deref()
        .or(txn.raw_source_text.as_deref())
        .unwrap_or("");

    format!(
        "{} {:12} {:>14} {:6} {}",
        txn.timestamp.format("%Y-%m-%d"),
        truncate(txn.category.as_str(), 12),
        txn.amount.format_with_symbol(currency_symbol),
        txn.source,
        truncate(label, 30).trim_end()
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:12} {:>14} {:6} {}\n",
        "Date", "Category", "Amount", "Source", "Description"
    ));
    output.push_str(&"-".repeat(76));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency_symbol));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.timestamp.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Category:    {} ({})\n", txn.category, txn.source));

    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    if let Some(sms) = &txn.raw_source_text {
        output.push_str(&format!("SMS:         {}\n", sms));
    }

    output
}
