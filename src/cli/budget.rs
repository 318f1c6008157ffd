//! Budget CLI commands

use chrono::Utc;
use clap::Subcommand;

use super::{parse_amount, parse_category};
use crate::config::AppConfig;
use crate::display::{format_budget_list, format_budget_status};
use crate::error::SpendwiseResult;
use crate::models::{MonthPeriod, OwnerRef};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly limit for a category (creates or replaces)
    Set {
        /// Category name (e.g., "Food")
        category: String,
        /// Monthly limit (e.g., "1000" or "1000.00")
        amount: String,
    },

    /// Show one budget with its month-to-date spending
    Show {
        /// Category name
        category: String,
    },

    /// List budgets
    List,

    /// Show spending against each budget
    Status {
        /// Month to report as YYYY-MM (defaults to the current month)
        #[arg(short, long, value_parser = MonthPeriod::parse)]
        month: Option<MonthPeriod>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    config: &AppConfig,
    owner: &OwnerRef,
    cmd: BudgetCommands,
) -> SpendwiseResult<()> {
    let service = BudgetService::new(storage);
    let symbol = &config.currency_symbol;

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let budget =
                service.set_budget(owner, parse_category(&category)?, parse_amount(&amount)?)?;
            println!(
                "Budget for {} set to {} per month",
                budget.category,
                budget.monthly_limit.format_with_symbol(symbol)
            );
        }
        BudgetCommands::Show { category } => {
            let status = service.show(owner, &parse_category(&category)?, Utc::now())?;
            print!("{}", format_budget_status(std::slice::from_ref(&status), symbol));
        }
        BudgetCommands::List => {
            print!("{}", format_budget_list(&service.list(owner)?, symbol));
        }
        BudgetCommands::Status { month } => {
            let period = month.unwrap_or_else(MonthPeriod::current);
            println!("Budget status for {}", period);
            print!(
                "{}",
                format_budget_status(&service.status_for(owner, period, Utc::now())?, symbol)
            );
        }
    }

    Ok(())
}
