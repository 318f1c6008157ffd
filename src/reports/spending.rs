//! Spending Report
//!
//! Generates an owner's spending by category and by day for a time window.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::SpendwiseResult;
use crate::models::{Category, Money, OwnerRef};
use crate::storage::Storage;

/// Spending breakdown by category
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingByCategory {
    pub category: Category,
    /// Total spending
    pub total: Money,
    /// Number of transactions
    pub transaction_count: usize,
    /// Percentage of total spending
    pub percentage: f64,
}

/// Spending on one calendar day (UTC)
#[derive(Debug, Clone, PartialEq)]
pub struct DailySpending {
    pub date: NaiveDate,
    pub total: Money,
}

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub owner: OwnerRef,
    /// Inclusive start of the window
    pub since: DateTime<Utc>,
    /// Exclusive end of the window
    pub until: DateTime<Utc>,
    /// Categories, largest spend first
    pub categories: Vec<SpendingByCategory>,
    /// Days with spending, oldest first
    pub daily: Vec<DailySpending>,
    pub total_spending: Money,
    pub total_transactions: usize,
}

impl SpendingReport {
    /// Generate a spending report for `since <= timestamp < until`
    pub fn generate(
        storage: &Storage,
        owner: &OwnerRef,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> SpendwiseResult<Self> {
        let transactions = storage.transactions.get_in_window(owner, since, until)?;

        let mut by_category: HashMap<Category, (Money, usize)> = HashMap::new();
        let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
        let mut total_spending = Money::zero();

        for txn in &transactions {
            let entry = by_category
                .entry(txn.category.clone())
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;

            *by_day.entry(txn.timestamp.date_naive()).or_default() += txn.amount;
            total_spending += txn.amount;
        }

        let mut categories: Vec<SpendingByCategory> = by_category
            .into_iter()
            .map(|(category, (total, transaction_count))| SpendingByCategory {
                percentage: if total_spending.is_zero() {
                    0.0
                } else {
                    (total.cents() as f64 / total_spending.cents() as f64) * 100.0
                },
                category,
                total,
                transaction_count,
            })
            .collect();

        // Largest first, ties by name so output is stable
        categories.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));

        let daily = by_day
            .into_iter()
            .map(|(date, total)| DailySpending { date, total })
            .collect();

        Ok(Self {
            owner: owner.clone(),
            since,
            until,
            categories,
            daily,
            total_spending,
            total_transactions: transactions.len(),
        })
    }

    /// Format the report for terminal display
    ///
    /// With `top`, only that many categories are listed; the total still
    /// covers every category.
    pub fn format_terminal(&self, currency_symbol: &str, top: Option<usize>) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&format!(
            "Spending Report for {}: {} to {}\n",
            self.owner,
            self.since.format("%Y-%m-%d"),
            self.until.format("%Y-%m-%d")
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.total_transactions == 0 {
            output.push_str("No spending in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<25} {:>14} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let shown = self.top_categories(top.unwrap_or(self.categories.len()));
        for row in shown {
            output.push_str(&format!(
                "{:<25} {:>14} {:>8} {:>7.1}%\n",
                row.category,
                row.total.format_with_symbol(currency_symbol),
                row.transaction_count,
                row.percentage
            ));
        }
        let hidden = self.categories.len() - shown.len();
        if hidden > 0 {
            output.push_str(&format!("({} more categories)\n", hidden));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<25} {:>14} {:>8}\n\n",
            "TOTAL SPENDING",
            self.total_spending.format_with_symbol(currency_symbol),
            self.total_transactions
        ));

        output.push_str("By day:\n");
        for day in &self.daily {
            output.push_str(&format!(
                "  {}  {:>14}\n",
                day.date,
                day.total.format_with_symbol(currency_symbol)
            ));
        }

        output
    }

    /// Get top spending categories
    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }
}
