//! Spendwise - SMS-driven expense tracking with budget alerts
//!
//! This library provides the core functionality for the Spendwise command
//! line application. Spending is recorded from pasted bank SMS messages or
//! typed descriptions, categorized by keyword rules or a trained text
//! classifier, and checked against per-category monthly budgets.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, alerts, money)
//! - `categorize`: Amount extraction and keyword rules for SMS text
//! - `classifier`: TF-IDF + Naive Bayes training and inference
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer, including the alert engine
//! - `audit`: Audit logging system
//! - `reports`: Spending reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwise::config::{Settings, SpendwisePaths};
//! use spendwise::storage::Storage;
//!
//! let paths = SpendwisePaths::new()?;
//! let config = Settings::load_or_create(&paths)?.resolve(&paths);
//! let mut storage = Storage::open(&config)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod categorize;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{SpendwiseError, SpendwiseResult};
