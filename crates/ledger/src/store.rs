//! The authoritative store boundary.
//!
//! The session never talks to the database directly; it goes through
//! [`TransactionStore`], which captures the contract the remote relational
//! store has to honour: filtered owner-scoped reads with a descending date
//! sort, and row-level insert/update/delete keyed by identifier. [`DbStore`]
//! is the sea-orm implementation of that contract.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, DatabaseConnection, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::util::{normalize_optional_text, validate_amount};
use crate::{LedgerError, ResultLedger, Transaction, TransactionKind, transactions};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

/// Inclusive bounds on `occurred_on` used to narrow fetches.
///
/// Either bound may be absent, meaning unbounded on that side; the
/// `Default` value selects everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// A transaction as entered by the user, before the store assigns an
/// identifier and creation timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    pub occurred_on: NaiveDate,
}

/// Partial update of the mutable transaction fields.
///
/// Identifier, owner and creation timestamp are immutable by omission from
/// this type. A `Some` note that trims to empty clears the stored note.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub note: Option<String>,
    pub occurred_on: Option<NaiveDate>,
}

/// Handles durable storage and retrieval of transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Returns the owner's transactions within `range`, ordered by
    /// `occurred_on` descending.
    async fn list(&self, owner: &str, range: &DateRange) -> ResultLedger<Vec<Transaction>>;

    /// Persists a new transaction and returns the stored row, with the
    /// store-assigned identifier and creation timestamp.
    async fn insert(&self, owner: &str, new: NewTransaction) -> ResultLedger<Transaction>;

    /// Applies `patch` to an existing row and returns the updated row.
    async fn update(&self, id: Uuid, patch: TransactionPatch) -> ResultLedger<Transaction>;

    /// Deletes the row with the given identifier.
    async fn delete(&self, id: Uuid) -> ResultLedger<()>;
}

/// [`TransactionStore`] backed by the relational database.
#[derive(Clone, Debug)]
pub struct DbStore {
    database: DatabaseConnection,
}

impl DbStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl TransactionStore for DbStore {
    async fn list(&self, owner: &str, range: &DateRange) -> ResultLedger<Vec<Transaction>> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::Owner.eq(owner))
            // Tie-break equal dates by creation time so the order is stable.
            .order_by_desc(transactions::Column::OccurredOn)
            .order_by_desc(transactions::Column::CreatedAt);

        if let Some(start) = range.start {
            query = query.filter(transactions::Column::OccurredOn.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(transactions::Column::OccurredOn.lte(end));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(Transaction::try_from).collect()
    }

    async fn insert(&self, owner: &str, new: NewTransaction) -> ResultLedger<Transaction> {
        let amount = validate_amount(new.amount)?;
        let model = transactions::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            owner: ActiveValue::Set(owner.to_string()),
            kind: ActiveValue::Set(new.kind.as_str().to_string()),
            amount: ActiveValue::Set(amount),
            category: ActiveValue::Set(new.category.trim().to_string()),
            note: ActiveValue::Set(normalize_optional_text(new.note.as_deref())),
            occurred_on: ActiveValue::Set(new.occurred_on),
            created_at: ActiveValue::Set(Utc::now()),
        };

        let inserted = model.insert(&self.database).await?;
        Transaction::try_from(inserted)
    }

    async fn update(&self, id: Uuid, patch: TransactionPatch) -> ResultLedger<Transaction> {
        with_tx!(self, |db_tx| {
            let model = transactions::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| LedgerError::KeyNotFound("transaction not exists".to_string()))?;

            let mut active: transactions::ActiveModel = model.into();
            if let Some(kind) = patch.kind {
                active.kind = ActiveValue::Set(kind.as_str().to_string());
            }
            if let Some(amount) = patch.amount {
                active.amount = ActiveValue::Set(validate_amount(amount)?);
            }
            if let Some(category) = patch.category {
                active.category = ActiveValue::Set(category.trim().to_string());
            }
            if let Some(note) = patch.note {
                active.note = ActiveValue::Set(normalize_optional_text(Some(&note)));
            }
            if let Some(occurred_on) = patch.occurred_on {
                active.occurred_on = ActiveValue::Set(occurred_on);
            }

            let updated = active.update(&db_tx).await?;
            Transaction::try_from(updated)
        })
    }

    async fn delete(&self, id: Uuid) -> ResultLedger<()> {
        let result = transactions::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(LedgerError::KeyNotFound("transaction not exists".to_string()));
        }
        Ok(())
    }
}
