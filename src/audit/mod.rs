//! Audit logging system for Spendwise
//!
//! Records every change to transactions, budgets, alerts, and trained models
//! in an append-only, line-delimited JSON log (JSONL).
//!
//! - `AuditEntry`: one operation with timestamp, entity information, and
//!   optional before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
