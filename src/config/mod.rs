//! Configuration module for Spendwise
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - The resolved [`AppConfig`] passed to the application entry point

pub mod paths;
pub mod settings;

pub use paths::SpendwisePaths;
pub use settings::{AlertScope, AppConfig, Settings};
