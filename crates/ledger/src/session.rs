//! The per-user ledger session.
//!
//! A [`LedgerSession`] owns the in-memory, non-authoritative copy of one
//! user's transactions and every transition that may touch it: fetching
//! from the authoritative store, the three optimistic mutations, and
//! display-currency changes. Operations take `&mut self`, so no two
//! operations on the same session ever interleave.

use std::sync::Arc;

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::audit::ActivityLog;
use crate::currency::{CurrencyChange, DisplayCurrency};
use crate::notify::Notifier;
use crate::store::{DateRange, NewTransaction, TransactionPatch, TransactionStore};
use crate::summary::{FinancialSummary, summarize};
use crate::{LedgerError, ResultLedger, Transaction};

pub struct LedgerSession {
    store: Arc<dyn TransactionStore>,
    activity_log: Arc<dyn ActivityLog>,
    notifier: Notifier,
    identity: Option<String>,
    currency: DisplayCurrency,
    cache: Vec<Transaction>,
    summary: Option<FinancialSummary>,
    loading: bool,
    currency_events: Option<broadcast::Receiver<CurrencyChange>>,
}

impl LedgerSession {
    /// Return a builder for `LedgerSession`. Help to build the struct.
    pub fn builder() -> LedgerSessionBuilder {
        LedgerSessionBuilder::default()
    }

    /// Replaces the cache with the owner's transactions within `range`,
    /// newest first.
    ///
    /// Without an identity this is a silent no-op. On store failure the
    /// cache keeps its last-known-good contents and a negative notice is
    /// emitted. The loading flag is set for the duration of the call,
    /// regardless of outcome.
    pub async fn fetch(&mut self, range: &DateRange) {
        let Some(owner) = self.identity.clone() else {
            return;
        };

        self.loading = true;
        match self.store.list(&owner, range).await {
            Ok(rows) => {
                self.cache = rows;
                self.summary = None;
            }
            Err(err) => {
                tracing::error!("failed to load transactions: {err}");
                self.notifier.negative("Failed to load transactions");
            }
        }
        self.loading = false;
    }

    /// Persists a new transaction for the current identity and prepends the
    /// stored row to the cache.
    ///
    /// Prepending preserves most-recent-first order as long as the entry is
    /// not backdated; a backdated creation stays out of chronological order
    /// until the next fetch. That is the documented contract, not a defect.
    pub async fn create(&mut self, new: NewTransaction) -> Option<Transaction> {
        let owner = self.identity.clone()?;

        match self.store.insert(&owner, new).await {
            Ok(tx) => {
                self.cache.insert(0, tx.clone());
                self.summary = None;
                self.record_activity(
                    &owner,
                    format!(
                        "added {} of {:.2} ({})",
                        tx.kind.as_str(),
                        tx.amount,
                        tx.category
                    ),
                )
                .await;
                self.notifier.positive("Transaction added");
                Some(tx)
            }
            Err(err) => {
                tracing::error!("failed to add transaction: {err}");
                self.notifier.negative("Failed to add transaction");
                None
            }
        }
    }

    /// Applies a partial update and replaces the matching cache entry in
    /// place, keeping its position.
    pub async fn update(&mut self, id: Uuid, patch: TransactionPatch) -> Option<Transaction> {
        let owner = self.identity.clone()?;

        match self.store.update(id, patch).await {
            Ok(updated) => {
                if let Some(slot) = self.cache.iter_mut().find(|tx| tx.id == id) {
                    *slot = updated.clone();
                }
                self.summary = None;
                self.record_activity(&owner, format!("updated transaction {id}"))
                    .await;
                self.notifier.positive("Transaction updated");
                Some(updated)
            }
            Err(err) => {
                tracing::error!("failed to update transaction {id}: {err}");
                self.notifier.negative("Failed to update transaction");
                None
            }
        }
    }

    /// Deletes a transaction and drops it from the cache.
    pub async fn remove(&mut self, id: Uuid) -> bool {
        let Some(owner) = self.identity.clone() else {
            return false;
        };

        match self.store.delete(id).await {
            Ok(()) => {
                self.cache.retain(|tx| tx.id != id);
                self.summary = None;
                self.record_activity(&owner, format!("deleted transaction {id}"))
                    .await;
                self.notifier.positive("Transaction deleted");
                true
            }
            Err(err) => {
                tracing::error!("failed to delete transaction {id}: {err}");
                self.notifier.negative("Failed to delete transaction");
                false
            }
        }
    }

    /// Switches the active display currency and rewrites every cached
    /// entry's `display_amount` to `amount * conversion_rate`.
    ///
    /// Presentation-only: persisted amounts are untouched and no store
    /// write happens.
    pub fn apply_currency_change(&mut self, change: &CurrencyChange) {
        self.currency = DisplayCurrency {
            code: change.code.clone(),
            symbol: change.symbol.clone(),
        };
        for tx in &mut self.cache {
            tx.display_amount = tx.amount * change.conversion_rate;
        }
        self.summary = None;
    }

    /// Drains pending currency change events and applies each in delivery
    /// order.
    pub fn sync_display_currency(&mut self) {
        use tokio::sync::broadcast::error::TryRecvError;

        loop {
            let Some(receiver) = self.currency_events.as_mut() else {
                return;
            };
            match receiver.try_recv() {
                Ok(change) => self.apply_currency_change(&change),
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!("currency event receiver lagged, skipped {missed} events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return,
            }
        }
    }

    /// Income/expense/balance totals for the current cache, memoized until
    /// the cache or the display currency changes.
    pub fn summary(&mut self) -> &FinancialSummary {
        self.summary
            .get_or_insert_with(|| summarize(&self.cache, &self.currency))
    }

    /// Updates the authenticated identity supplied by the session context.
    ///
    /// The cache is left as-is; callers re-fetch when the identity changes.
    pub fn set_identity(&mut self, identity: Option<String>) {
        self.identity = identity;
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.cache
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn display_currency(&self) -> &DisplayCurrency {
        &self.currency
    }

    async fn record_activity(&self, owner: &str, description: String) {
        // The mutation already committed; a failed audit write must not
        // undo or mask it.
        if let Err(err) = self.activity_log.append(owner, &description).await {
            tracing::warn!("failed to record activity entry: {err}");
        }
    }
}

/// The builder for `LedgerSession`
#[derive(Default)]
pub struct LedgerSessionBuilder {
    store: Option<Arc<dyn TransactionStore>>,
    activity_log: Option<Arc<dyn ActivityLog>>,
    notifier: Option<Notifier>,
    identity: Option<String>,
    currency: DisplayCurrency,
    currency_events: Option<broadcast::Receiver<CurrencyChange>>,
}

impl LedgerSessionBuilder {
    /// Pass the required transaction store
    pub fn store(mut self, store: Arc<dyn TransactionStore>) -> LedgerSessionBuilder {
        self.store = Some(store);
        self
    }

    /// Pass the required activity log
    pub fn activity_log(mut self, activity_log: Arc<dyn ActivityLog>) -> LedgerSessionBuilder {
        self.activity_log = Some(activity_log);
        self
    }

    pub fn notifier(mut self, notifier: Notifier) -> LedgerSessionBuilder {
        self.notifier = Some(notifier);
        self
    }

    pub fn identity(mut self, identity: impl Into<String>) -> LedgerSessionBuilder {
        self.identity = Some(identity.into());
        self
    }

    pub fn display_currency(mut self, currency: DisplayCurrency) -> LedgerSessionBuilder {
        self.currency = currency;
        self
    }

    /// Subscribe the session to a currency change channel for its lifetime.
    pub fn currency_events(
        mut self,
        receiver: broadcast::Receiver<CurrencyChange>,
    ) -> LedgerSessionBuilder {
        self.currency_events = Some(receiver);
        self
    }

    /// Construct `LedgerSession`
    pub fn build(self) -> ResultLedger<LedgerSession> {
        let store = self.store.ok_or_else(|| {
            LedgerError::Misconfigured("a transaction store is required".to_string())
        })?;
        let activity_log = self.activity_log.ok_or_else(|| {
            LedgerError::Misconfigured("an activity log is required".to_string())
        })?;
        let notifier = self.notifier.unwrap_or_else(|| Notifier::channel().0);

        Ok(LedgerSession {
            store,
            activity_log,
            notifier,
            identity: self.identity,
            currency: self.currency,
            cache: Vec::new(),
            summary: None,
            loading: false,
            currency_events: self.currency_events,
        })
    }
}
