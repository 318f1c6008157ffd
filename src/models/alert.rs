//! Alert model
//!
//! Alerts are derived notifications. The alert text is the identity: two
//! alerts for the same owner never share byte-identical text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::ids::{AlertId, OwnerRef};
use super::period::MonthPeriod;

/// An over-budget notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,

    /// The user this alert belongs to
    pub owner: OwnerRef,

    /// Message shown to the user
    pub text: String,

    /// Category whose budget was exceeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Month that was evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<MonthPeriod>,

    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Create an alert for an exceeded budget
    pub fn over_budget(
        owner: OwnerRef,
        text: impl Into<String>,
        category: Category,
        period: MonthPeriod,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AlertId::new(),
            owner,
            text: text.into(),
            category: Some(category),
            period: Some(period),
            created_at,
        }
    }
}
