//! Classifier CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::audit::{AuditEntry, EntityType};
use crate::classifier::{train_from_csv, ModelSlot};
use crate::config::AppConfig;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::storage::Storage;

/// Model subcommands
#[derive(Subcommand)]
pub enum ModelCommands {
    /// Train the classifier from a labeled CSV file
    Train {
        /// Dataset path (defaults to the configured dataset)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
        /// Where to write the model (defaults to the configured artifact path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Predict the category of a description
    Predict {
        /// Free-text description (e.g., "dinner at swiggy")
        description: String,
    },

    /// Show the loaded model
    Info,
}

/// Handle a model command
pub fn handle_model_command(
    storage: &Storage,
    config: &AppConfig,
    cmd: ModelCommands,
) -> SpendwiseResult<()> {
    match cmd {
        ModelCommands::Train { dataset, out } => {
            let dataset = dataset.unwrap_or_else(|| config.dataset_path.clone());
            let out = out.unwrap_or_else(|| config.model_artifact_path.clone());

            let summary = train_from_csv(&dataset, &out)?;
            storage.audit().log(&AuditEntry::create(
                EntityType::Model,
                out.display().to_string(),
                None,
                &summary,
            ))?;

            println!("Saved model: {}", out.display());
            println!("  Examples:   {}", summary.examples);
            println!(
                "  Categories: {}",
                summary
                    .classes
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("  Vocabulary: {}", summary.vocabulary_size);
        }
        ModelCommands::Predict { description } => {
            if description.trim().is_empty() {
                return Err(SpendwiseError::Validation("description is empty".into()));
            }
            let slot = ModelSlot::load(&config.model_artifact_path)?;
            println!("{}", slot.predict(&description)?);
        }
        ModelCommands::Info => {
            let slot = ModelSlot::load(&config.model_artifact_path)?;
            match slot.model() {
                Some(model) => {
                    println!("Model:      {}", config.model_artifact_path.display());
                    println!("Format:     v{}", model.format_version);
                    println!(
                        "Trained:    {}",
                        model.trained_at.format("%Y-%m-%d %H:%M UTC")
                    );
                    println!("Examples:   {}", model.example_count);
                    println!(
                        "Categories: {}",
                        model
                            .labels()
                            .iter()
                            .map(|c| c.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                    println!("Vocabulary: {}", model.classifier.vocabulary_size());
                }
                None => {
                    println!(
                        "No model at {}. Run 'spendwise model train' to create one.",
                        config.model_artifact_path.display()
                    );
                }
            }
        }
    }

    Ok(())
}
