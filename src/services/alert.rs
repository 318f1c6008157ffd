//! Budget rollup and alert generation
//!
//! For every budget an owner has, the month-to-date spend in that category is
//! compared against the limit. Spend strictly above the limit produces an
//! alert, unless the owner already holds an alert with the same text.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::config::AlertScope;
use crate::error::SpendwiseResult;
use crate::models::{Alert, Budget, Category, Money, MonthPeriod, OwnerRef};
use crate::storage::Storage;

/// The reads and writes the alert engine needs from the store
pub trait SpendStore {
    /// All budgets an owner has defined
    fn budgets_for(&self, owner: &OwnerRef) -> SpendwiseResult<Vec<Budget>>;

    /// Total spend in one category with `since <= timestamp < until`
    fn spent_in_window(
        &self,
        owner: &OwnerRef,
        category: &Category,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> SpendwiseResult<Money>;

    /// Whether the owner already holds an alert with exactly this text
    fn has_alert_text(&self, owner: &OwnerRef, text: &str) -> SpendwiseResult<bool>;

    fn insert_alert(&self, alert: Alert) -> SpendwiseResult<()>;

    /// Make inserted alerts durable; `created` are the alerts inserted since
    /// the last commit
    fn commit_alerts(&self, created: &[Alert]) -> SpendwiseResult<()>;
}

/// Build the alert message for an exceeded budget
pub fn alert_text(category: &Category, period: MonthPeriod, scope: AlertScope) -> String {
    match scope {
        AlertScope::Period => format!(
            "⚠️ You exceeded your {} budget for {}!",
            category, period
        ),
        AlertScope::Lifetime => format!("⚠️ You exceeded your {} budget!", category),
    }
}

/// Evaluates budgets against month-to-date spend
pub struct AlertEngine<'a, S: SpendStore> {
    store: &'a S,
    scope: AlertScope,
}

impl<'a, S: SpendStore> AlertEngine<'a, S> {
    pub fn new(store: &'a S, scope: AlertScope) -> Self {
        Self { store, scope }
    }

    /// Evaluate an owner's budgets against the current clock
    pub fn evaluate(&self, owner: &OwnerRef) -> SpendwiseResult<Vec<Alert>> {
        self.evaluate_at(owner, Utc::now())
    }

    /// Evaluate an owner's budgets as of `now`
    ///
    /// Returns only the alerts created by this call. Store failures are
    /// reported as dependency errors.
    pub fn evaluate_at(&self, owner: &OwnerRef, now: DateTime<Utc>) -> SpendwiseResult<Vec<Alert>> {
        let period = MonthPeriod::containing(now);
        let since = period.start();

        let budgets = self
            .store
            .budgets_for(owner)
            .map_err(|e| e.into_dependency())?;

        let mut created = Vec::new();
        for budget in budgets {
            let spent = self
                .store
                .spent_in_window(owner, &budget.category, since, now)
                .map_err(|e| e.into_dependency())?;

            if !budget.is_exceeded_by(spent) {
                continue;
            }

            let text = alert_text(&budget.category, period, self.scope);
            if self
                .store
                .has_alert_text(owner, &text)
                .map_err(|e| e.into_dependency())?
            {
                debug!(owner = %owner, category = %budget.category, "alert already raised");
                continue;
            }

            let alert = Alert::over_budget(owner.clone(), text, budget.category.clone(), period, now);
            self.store
                .insert_alert(alert.clone())
                .map_err(|e| e.into_dependency())?;
            info!(
                owner = %owner,
                category = %budget.category,
                spent = %spent,
                limit = %budget.monthly_limit,
                "budget exceeded"
            );
            created.push(alert);
        }

        if !created.is_empty() {
            self.store
                .commit_alerts(&created)
                .map_err(|e| e.into_dependency())?;
        }

        Ok(created)
    }
}

/// Service for reading, checking, and clearing alerts
pub struct AlertService<'a> {
    storage: &'a Storage,
    scope: AlertScope,
}

impl<'a> AlertService<'a> {
    pub fn new(storage: &'a Storage, scope: AlertScope) -> Self {
        Self { storage, scope }
    }

    /// Run the alert engine for an owner now
    pub fn evaluate(&self, owner: &OwnerRef) -> SpendwiseResult<Vec<Alert>> {
        AlertEngine::new(self.storage, self.scope).evaluate(owner)
    }

    /// An owner's alerts, newest first
    pub fn list(&self, owner: &OwnerRef) -> SpendwiseResult<Vec<Alert>> {
        self.storage.alerts.get_for_owner(owner)
    }

    /// Delete all of an owner's alerts, returning how many were removed
    pub fn clear(&self, owner: &OwnerRef) -> SpendwiseResult<usize> {
        let removed = self.storage.alerts.remove_for_owner(owner)?;
        if removed.is_empty() {
            return Ok(0);
        }

        self.storage.alerts.save()?;
        for alert in &removed {
            self.storage
                .log_delete(EntityType::Alert, alert.id.to_string(), owner, alert)?;
        }

        Ok(removed.len())
    }
}
