//! Budget display formatting

use super::truncate;
use crate::models::{Budget, BudgetStatus};

/// Format budgets with their monthly limits
pub fn format_budget_list(budgets: &[Budget], currency_symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:20} {:>14}\n", "Category", "Monthly limit"));
    output.push_str(&"-".repeat(35));
    output.push('\n');

    for budget in budgets {
        output.push_str(&format!(
            "{} {:>14}\n",
            truncate(budget.category.as_str(), 20),
            budget.monthly_limit.format_with_symbol(currency_symbol)
        ));
    }

    output
}

/// Format month-to-date spend against each budget
pub fn format_budget_status(statuses: &[BudgetStatus], currency_symbol: &str) -> String {
    if statuses.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:20} {:>14} {:>14} {:>14}\n",
        "Category", "Limit", "Spent", "Remaining"
    ));
    output.push_str(&"-".repeat(65));
    output.push('\n');

    for status in statuses {
        let marker = if status.is_over() { " OVER" } else { "" };
        output.push_str(&format!(
            "{} {:>14} {:>14} {:>14}{}\n",
            truncate(status.budget.category.as_str(), 20),
            status.budget.monthly_limit.format_with_symbol(currency_symbol),
            status.spent.format_with_symbol(currency_symbol),
            status.remaining().format_with_symbol(currency_symbol),
            marker
        ));
    }

    output
}
