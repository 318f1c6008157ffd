//! Transaction service
//!
//! Records spends from pasted SMS text or from a typed amount and
//! description, then runs the alert engine so the caller sees any budget the
//! new spend pushed over its limit.

use chrono::{Duration, Utc};
use tracing::{debug, warn};

use super::alert::AlertEngine;
use crate::audit::EntityType;
use crate::categorize::{self, extract};
use crate::classifier::ModelSlot;
use crate::config::AlertScope;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Alert, Category, CategorySource, Money, MonthPeriod, OwnerRef, Transaction};
use crate::storage::Storage;

/// Default number of transactions returned by [`TransactionService::list_recent`]
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// A stored transaction and the alerts it triggered
///
/// The transaction is durable even when the budget check after it failed;
/// `alert_error` then carries the reason and `alerts` is empty.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub transaction: Transaction,
    pub alerts: Vec<Alert>,
    pub alert_error: Option<String>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    scope: AlertScope,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage, scope: AlertScope) -> Self {
        Self { storage, scope }
    }

    /// Record a spend parsed out of a bank SMS
    pub fn record_sms(
        &self,
        owner: &OwnerRef,
        sms: &str,
        description: Option<&str>,
    ) -> SpendwiseResult<Recorded> {
        if sms.trim().is_empty() {
            return Err(SpendwiseError::Validation("SMS text is empty".into()));
        }

        let extraction = extract(sms);
        let amount = extraction.amount.ok_or_else(|| {
            SpendwiseError::Validation("could not detect amount in SMS text".into())
        })?;
        debug!(amount = %amount, category = %extraction.category, "parsed sms");

        let mut txn = Transaction::new(owner.clone(), amount, extraction.category)
            .with_source(CategorySource::SmsRules)
            .with_raw_source(sms);
        if let Some(description) = description {
            txn = txn.with_description(description);
        }

        self.record(txn)
    }

    /// Record a spend from an amount and a free-text description
    ///
    /// The category comes from the trained classifier; without one the
    /// keyword rules decide.
    pub fn record_described(
        &self,
        owner: &OwnerRef,
        amount: Money,
        description: &str,
        model: &ModelSlot,
    ) -> SpendwiseResult<Recorded> {
        if description.trim().is_empty() {
            return Err(SpendwiseError::Validation("description is empty".into()));
        }

        let (category, source) = match model.predict(description) {
            Ok(category) => (category, CategorySource::Classifier),
            Err(SpendwiseError::ModelNotLoaded) => {
                warn!("no trained model loaded, categorizing with keyword rules");
                (categorize::categorize(description), CategorySource::RulesFallback)
            }
            Err(e) => return Err(e),
        };

        let txn = Transaction::new(owner.clone(), amount, category)
            .with_source(source)
            .with_description(description);

        self.record(txn)
    }

    /// Record a spend with a category chosen by the user
    pub fn record_manual(
        &self,
        owner: &OwnerRef,
        amount: Money,
        category: Category,
        description: &str,
    ) -> SpendwiseResult<Recorded> {
        let txn = Transaction::new(owner.clone(), amount, category)
            .with_source(CategorySource::Manual)
            .with_description(description);

        self.record(txn)
    }

    fn record(&self, txn: Transaction) -> SpendwiseResult<Recorded> {
        txn.validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;
        self.check_month_total(&txn)?;

        self.storage.transactions.insert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage
            .log_create(EntityType::Transaction, txn.id.to_string(), &txn.owner, &txn)?;

        // The alert window excludes its upper bound, so evaluate strictly after the new spend
        let now = Utc::now().max(txn.timestamp + Duration::nanoseconds(1));
        let (alerts, alert_error) =
            match AlertEngine::new(self.storage, self.scope).evaluate_at(&txn.owner, now) {
                Ok(alerts) => (alerts, None),
                Err(e) => {
                    warn!(transaction = %txn.id, error = %e, "transaction stored but budget check failed");
                    (Vec::new(), Some(e.to_string()))
                }
            };

        Ok(Recorded {
            transaction: txn,
            alerts,
            alert_error,
        })
    }

    /// Reject a spend that would take its category's monthly total out of range
    fn check_month_total(&self, txn: &Transaction) -> SpendwiseResult<()> {
        let period = MonthPeriod::containing(txn.timestamp);
        let month_total = self.storage.transactions.sum_in_window(
            &txn.owner,
            &txn.category,
            period.start(),
            period.end(),
        )?;

        match month_total.checked_add(txn.amount) {
            Some(_) => Ok(()),
            None => Err(SpendwiseError::Validation(format!(
                "amount {} would push the {} total for {} past the supported range",
                txn.amount, txn.category, period
            ))),
        }
    }

    /// An owner's most recent transactions, newest first
    pub fn list_recent(&self, owner: &OwnerRef, limit: usize) -> SpendwiseResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_by_owner(owner)?;
        transactions.truncate(limit);
        Ok(transactions)
    }
}
