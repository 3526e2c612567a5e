pub use audit::{ACTIVITY_TYPE_TRANSACTION, ActivityLog, DbActivityLog};
pub use currency::{CurrencyChange, DisplayCurrency, format_amount};
pub use error::LedgerError;
pub use events::CurrencyEvents;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use session::{LedgerSession, LedgerSessionBuilder};
pub use store::{DateRange, DbStore, NewTransaction, TransactionPatch, TransactionStore};
pub use summary::{FinancialSummary, summarize};
pub use transactions::{Transaction, TransactionKind};

mod audit;
mod currency;
mod error;
mod events;
mod notify;
pub mod preferences;
mod session;
mod store;
mod summary;
mod transactions;
mod util;

pub type ResultLedger<T> = Result<T, LedgerError>;
