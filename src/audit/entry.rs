//! Audit entry records
//!
//! One line of the audit log: what changed, whose data it was, and JSON
//! snapshots of the record around the change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::OwnerRef;

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of record a change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transaction,
    Budget,
    Alert,
    /// A trained classifier artifact; not tied to an owner
    Model,
}

impl EntityType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityType::Transaction => "transaction",
            EntityType::Budget => "budget",
            EntityType::Alert => "alert",
            EntityType::Model => "model",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit log line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// Owner of the changed record; `None` for shared records such as models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Short "field: old -> new" description of an update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

fn snapshot<T: Serialize>(value: &T) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: Option<&OwnerRef>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            owner: owner.cloned(),
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// A record came into existence
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: Option<&OwnerRef>,
        entity: &T,
    ) -> Self {
        Self {
            after: snapshot(entity),
            ..Self::new(Operation::Create, entity_type, entity_id, owner)
        }
    }

    /// A record was replaced; `diff_summary` describes what moved
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: Option<&OwnerRef>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: snapshot(before),
            after: snapshot(after),
            diff_summary,
            ..Self::new(Operation::Update, entity_type, entity_id, owner)
        }
    }

    /// A record was removed
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: Option<&OwnerRef>,
        entity: &T,
    ) -> Self {
        Self {
            before: snapshot(entity),
            ..Self::new(Operation::Delete, entity_type, entity_id, owner)
        }
    }

    /// Whether `owner` may see this entry: their own records plus shared ones
    pub fn visible_to(&self, owner: &OwnerRef) -> bool {
        self.owner.as_ref().map_or(true, |o| o == owner)
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<6} {:<11} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.entity_type,
            self.entity_id
        )?;
        if let Some(diff) = &self.diff_summary {
            write!(f, "  ({})", diff)?;
        }
        Ok(())
    }
}
