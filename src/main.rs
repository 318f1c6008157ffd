use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spendwise::classifier::write_sample_dataset;
use spendwise::cli::{
    handle_alert_command, handle_audit_command, handle_budget_command, handle_model_command,
    handle_report_command, handle_transaction_command,
};
use spendwise::config::{AppConfig, Settings, SpendwisePaths};
use spendwise::models::OwnerRef;
use spendwise::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendwise",
    author = "Kaylee Beyene",
    version,
    about = "SMS-driven expense tracker with learned categories and budget alerts",
    long_about = "Spendwise records spending from pasted bank SMS messages or typed \
                  descriptions, categorizes it with keyword rules or a trained text \
                  classifier, and alerts you when a category goes over its monthly budget."
)]
struct Cli {
    /// User whose data to work with (defaults to the configured owner)
    #[arg(long, global = true, env = "SPENDWISE_OWNER")]
    owner: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(spendwise::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(spendwise::cli::BudgetCommands),

    /// Alert commands
    #[command(subcommand)]
    Alert(spendwise::cli::AlertCommands),

    /// Reports
    #[command(subcommand)]
    Report(spendwise::cli::ReportCommands),

    /// Classifier training and prediction
    #[command(subcommand)]
    Model(spendwise::cli::ModelCommands),

    /// Show recent changes to your data
    Audit(spendwise::cli::AuditArgs),

    /// Initialize configuration and a starter dataset
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    // Initialize paths and settings
    let paths = SpendwisePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let config = settings.resolve(&paths);
    debug!(base = %paths.base_dir().display(), "resolved configuration");

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Spendwise - SMS expense tracking with budget alerts");
            println!();
            println!("Run 'spendwise --help' for usage information.");
            println!("Run 'spendwise init' to get started.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => return run_init(&paths, &settings, &config),
        Commands::Config => {
            print_config(&paths, &settings, &config);
            return Ok(());
        }
        _ => {}
    }

    let owner_name = cli.owner.unwrap_or_else(|| settings.default_owner.clone());
    let owner = OwnerRef::new(&owner_name).context("owner must not be blank")?;

    // Initialize storage
    let mut storage = Storage::open(&config)?;
    storage.load_all()?;

    match command {
        Commands::Txn(cmd) => handle_transaction_command(&storage, &config, &owner, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, &config, &owner, cmd)?,
        Commands::Alert(cmd) => handle_alert_command(&storage, &config, &owner, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &config, &owner, cmd)?,
        Commands::Model(cmd) => handle_model_command(&storage, &config, cmd)?,
        Commands::Audit(args) => handle_audit_command(&storage, &owner, args)?,
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}

fn run_init(paths: &SpendwisePaths, settings: &Settings, config: &AppConfig) -> Result<()> {
    println!("Initializing Spendwise at: {}", paths.base_dir().display());
    settings.save(paths)?;
    Storage::open(config)?;

    if write_sample_dataset(&config.dataset_path)? {
        println!("Wrote starter dataset: {}", config.dataset_path.display());
    }

    println!("Initialization complete!");
    println!();
    println!("Next steps:");
    println!("  spendwise model train");
    println!("  spendwise budget set Food 1000");
    println!("  spendwise txn add --sms \"Rs. 450 spent at Swiggy\"");
    Ok(())
}

fn print_config(paths: &SpendwisePaths, settings: &Settings, config: &AppConfig) {
    println!("Spendwise Configuration");
    println!("=======================");
    println!("Config file:   {}", paths.settings_file().display());
    println!("Store:         {}", config.store_location.display());
    println!("Model:         {}", config.model_artifact_path.display());
    println!("Dataset:       {}", config.dataset_path.display());
    println!("Audit log:     {}", config.audit_log_path().display());
    println!();
    println!("Settings:");
    println!("  Default owner:  {}", settings.default_owner);
    println!("  Currency:       {}", config.currency_symbol);
    println!("  Alert scope:    {:?}", config.alert_scope);
    println!("  Initialized:    {}", paths.is_initialized());
}
