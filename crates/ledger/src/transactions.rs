//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense record belonging to one
//! user. The authoritative copy lives in the `transactions` table; the
//! in-memory value additionally carries `display_amount`, a
//! presentation-only projection that is never written back.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, ResultLedger};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::InvalidRecord(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub owner: String,
    pub kind: TransactionKind,
    /// Amount in the currency the record was originally entered in.
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    /// Calendar date the transaction is attributed to (no time component).
    pub occurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// `amount` rescaled for the active display currency. Ephemeral: equals
    /// `amount` when read from the store and is only ever rewritten by a
    /// currency change event.
    pub display_amount: f64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub kind: String,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub amount: Decimal,
    pub category: String,
    pub note: Option<String>,
    pub occurred_on: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let amount = decimal_to_f64(model.amount)?;
        Ok(Self {
            id: parse_transaction_id(&model.id)?,
            owner: model.owner,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount,
            category: model.category,
            note: model.note,
            occurred_on: model.occurred_on,
            created_at: model.created_at,
            display_amount: amount,
        })
    }
}

pub(crate) fn parse_transaction_id(value: &str) -> ResultLedger<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| LedgerError::InvalidRecord(format!("invalid transaction id: {value}")))
}

pub(crate) fn decimal_to_f64(value: Decimal) -> ResultLedger<f64> {
    value
        .to_f64()
        .ok_or_else(|| LedgerError::InvalidRecord(format!("unrepresentable amount: {value}")))
}
