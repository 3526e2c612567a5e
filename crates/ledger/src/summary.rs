//! Derived financial totals.

use serde::Serialize;

use crate::currency::{DisplayCurrency, format_amount};
use crate::{Transaction, TransactionKind};

/// Income/expense/balance totals over a set of transactions, each paired
/// with its rendering in the active display currency.
///
/// Totals are sums of the persisted `amount` values, never of
/// `display_amount`; only the symbol follows the display currency.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub income_display: String,
    pub expenses_display: String,
    pub balance_display: String,
}

/// Computes the totals for `entries`. Pure: no side effects, no I/O, and
/// independent of entry order.
pub fn summarize(entries: &[Transaction], currency: &DisplayCurrency) -> FinancialSummary {
    let mut income = 0.0;
    let mut expenses = 0.0;
    for entry in entries {
        match entry.kind {
            TransactionKind::Income => income += entry.amount,
            TransactionKind::Expense => expenses += entry.amount,
        }
    }
    let balance = income - expenses;

    FinancialSummary {
        income,
        expenses,
        balance,
        income_display: format_amount(&currency.symbol, income),
        expenses_display: format_amount(&currency.symbol, expenses),
        balance_display: format_amount(&currency.symbol, balance),
    }
}
