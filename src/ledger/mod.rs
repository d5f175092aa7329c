//! Ledger domain model: transactions, filters, and the totals derived from them.

pub mod category;
pub mod filter;
pub mod ids;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod summary;
pub mod transaction;

pub use category::Category;
pub use filter::{Filter, Selection};
pub use ids::IdGenerator;
pub use ledger::Ledger;
pub use summary::{CategoryTotal, MonthlyBucket, Summary, MONTHLY_WINDOW};
pub use transaction::{
    Transaction, TransactionDraft, TransactionForm, TransactionId, TransactionKind,
};
