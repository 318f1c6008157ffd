//! Transaction CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_category};
use crate::classifier::ModelSlot;
use crate::config::AppConfig;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::SpendwiseResult;
use crate::models::OwnerRef;
use crate::services::{Recorded, TransactionService, DEFAULT_LIST_LIMIT};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a spend from pasted bank SMS text
    Add {
        /// Full SMS text (e.g., "Rs. 450 spent at Swiggy")
        #[arg(long)]
        sms: String,
        /// Optional note to keep with the transaction
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Record a spend from an amount and a description
    Note {
        /// Amount (e.g., "450" or "450.50")
        amount: String,
        /// What the money was spent on
        description: String,
        /// Use this category instead of predicting one
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: usize,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    config: &AppConfig,
    owner: &OwnerRef,
    cmd: TransactionCommands,
) -> SpendwiseResult<()> {
    let service = TransactionService::new(storage, config.alert_scope);

    match cmd {
        TransactionCommands::Add { sms, description } => {
            let recorded = service.record_sms(owner, &sms, description.as_deref())?;
            print_recorded(&recorded, config);
        }
        TransactionCommands::Note {
            amount,
            description,
            category,
        } => {
            let amount = parse_amount(&amount)?;
            let recorded = match category {
                Some(category) => {
                    service.record_manual(owner, amount, parse_category(&category)?, &description)?
                }
                None => {
                    let model = ModelSlot::load(&config.model_artifact_path)?;
                    service.record_described(owner, amount, &description, &model)?
                }
            };
            print_recorded(&recorded, config);
        }
        TransactionCommands::List { limit } => {
            let transactions = service.list_recent(owner, limit)?;
            print!(
                "{}",
                format_transaction_register(&transactions, &config.currency_symbol)
            );
        }
    }

    Ok(())
}

fn print_recorded(recorded: &Recorded, config: &AppConfig) {
    println!("Recorded transaction:");
    print!(
        "{}",
        format_transaction_details(&recorded.transaction, &config.currency_symbol)
    );
    for alert in &recorded.alerts {
        println!();
        println!("{}", alert.text);
    }
    if let Some(error) = &recorded.alert_error {
        eprintln!("Budget check failed ({}); run 'spendwise alert check' to retry", error);
    }
}
