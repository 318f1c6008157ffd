//! Alert CLI commands

use clap::Subcommand;

use crate::config::AppConfig;
use crate::display::format_alert_list;
use crate::error::SpendwiseResult;
use crate::models::OwnerRef;
use crate::services::AlertService;
use crate::storage::Storage;

/// Alert subcommands
#[derive(Subcommand)]
pub enum AlertCommands {
    /// List alerts, newest first
    List,

    /// Check budgets now and report new alerts
    Check,

    /// Delete all alerts
    Clear,
}

/// Handle an alert command
pub fn handle_alert_command(
    storage: &Storage,
    config: &AppConfig,
    owner: &OwnerRef,
    cmd: AlertCommands,
) -> SpendwiseResult<()> {
    let service = AlertService::new(storage, config.alert_scope);

    match cmd {
        AlertCommands::List => {
            print!("{}", format_alert_list(&service.list(owner)?));
        }
        AlertCommands::Check => {
            let created = service.evaluate(owner)?;
            if created.is_empty() {
                println!("No new alerts.");
            } else {
                for alert in &created {
                    println!("{}", alert.text);
                }
            }
        }
        AlertCommands::Clear => {
            let removed = service.clear(owner)?;
            println!("Cleared {} alert(s).", removed);
        }
    }

    Ok(())
}
