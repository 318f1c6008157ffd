//! Report CLI commands

use chrono::{Duration, Utc};
use clap::Subcommand;

use crate::config::AppConfig;
use crate::error::SpendwiseResult;
use crate::models::OwnerRef;
use crate::reports::SpendingReport;
use crate::storage::Storage;

/// Longest look-back accepted by `report spending --days`
pub const MAX_REPORT_DAYS: u32 = 36_500;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending by category and by day
    Spending {
        /// Number of days to look back
        #[arg(
            short,
            long,
            default_value_t = 30,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_REPORT_DAYS))
        )]
        days: u32,
        /// Show only the largest N categories
        #[arg(short, long)]
        top: Option<usize>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    config: &AppConfig,
    owner: &OwnerRef,
    cmd: ReportCommands,
) -> SpendwiseResult<()> {
    match cmd {
        ReportCommands::Spending { days, top } => {
            let until = Utc::now();
            let since = until - Duration::days(i64::from(days));
            let report = SpendingReport::generate(storage, owner, since, until)?;
            print!("{}", report.format_terminal(&config.currency_symbol, top));
        }
    }

    Ok(())
}
