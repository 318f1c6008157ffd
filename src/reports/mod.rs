//! Reports module for Spendwise
//!
//! Provides spending analysis over a time window.

pub mod spending;

pub use spending::{DailySpending, SpendingByCategory, SpendingReport};
