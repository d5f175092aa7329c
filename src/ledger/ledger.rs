use std::{collections::HashSet, fmt, sync::Arc};

use chrono::NaiveDate;
use tracing::debug;

use crate::core::time::{Clock, SystemClock};
use crate::errors::{LedgerError, Result};

use super::{
    category::Category,
    filter::Filter,
    ids::IdGenerator,
    summary::{self, CategoryTotal, MonthlyBucket, Summary},
    transaction::{Transaction, TransactionDraft, TransactionId, TransactionKind},
};

/// Ordered collection of transactions, newest first, plus the totals derived from it.
pub struct Ledger {
    transactions: Vec<Transaction>,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            transactions: Vec::new(),
            ids: IdGenerator::default(),
            clock,
        }
    }

    /// Rebuilds a ledger from persisted records, keeping their order.
    ///
    /// Persisted data that breaks the ledger invariants is reported as a
    /// storage error instead of being repaired silently.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self> {
        Self::from_transactions_with_clock(transactions, Arc::new(SystemClock))
    }

    pub fn from_transactions_with_clock(
        transactions: Vec<Transaction>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for txn in &transactions {
            if !seen.insert(txn.id) {
                return Err(LedgerError::storage(format!(
                    "corrupt ledger data: duplicate transaction id {}",
                    txn.id
                )));
            }
            if !txn.amount.is_finite() || txn.amount <= 0.0 {
                return Err(LedgerError::storage(format!(
                    "corrupt ledger data: transaction {} has amount {}",
                    txn.id, txn.amount
                )));
            }
            if txn.description.trim().is_empty() {
                return Err(LedgerError::storage(format!(
                    "corrupt ledger data: transaction {} has an empty description",
                    txn.id
                )));
            }
        }
        let last_id = transactions.iter().map(|txn| txn.id).max().unwrap_or(0);
        Ok(Self {
            transactions,
            ids: IdGenerator::seeded(last_id),
            clock,
        })
    }

    /// Records a validated draft at the front of the ledger and returns the stored copy.
    pub fn add(&mut self, draft: TransactionDraft) -> Transaction {
        let now = self.clock.now();
        let id = self.ids.next(now);
        let txn = Transaction::from_draft(id, draft, now);
        debug!(id, kind = %txn.kind, category = %txn.category, "transaction added");
        self.transactions.insert(0, txn.clone());
        txn
    }

    /// Validates raw field values and records them. Nothing changes on error.
    pub fn record(
        &mut self,
        description: &str,
        amount: f64,
        category: Category,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Result<Transaction> {
        let draft = TransactionDraft::new(description, amount, category, kind, date)?;
        Ok(self.add(draft))
    }

    /// Removes the transaction with `id`. Returns `false` when no such transaction exists.
    pub fn delete(&mut self, id: TransactionId) -> bool {
        match self.transactions.iter().position(|txn| txn.id == id) {
            Some(index) => {
                self.transactions.remove(index);
                debug!(id, "transaction deleted");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn filtered(&self, filter: &Filter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect()
    }

    /// Totals over every transaction; filters never apply here.
    pub fn summary(&self) -> Summary {
        Summary::from_transactions(&self.transactions)
    }

    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        summary::category_totals(&self.transactions)
    }

    pub fn monthly_totals(&self, reference: NaiveDate) -> Vec<MonthlyBucket> {
        summary::monthly_totals(&self.transactions, reference)
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions)
            .field("last_id", &self.ids.last())
            .finish()
    }
}
