use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::{LedgerError, Result};
use crate::ledger::{
    CategoryTotal, Filter, Ledger, MonthlyBucket, Summary, Transaction, TransactionDraft,
    TransactionForm, TransactionId,
};
use crate::storage::{JsonStorage, StorageBackend};

use super::time::{Clock, SystemClock};

/// Result of a mutation that was applied in memory. `storage_warning` is set
/// when writing the ledger back to storage failed; the change is kept for the
/// session but may not survive a reload.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub storage_warning: Option<LedgerError>,
}

impl<T> Committed<T> {
    pub fn is_persisted(&self) -> bool {
        self.storage_warning.is_none()
    }
}

/// Everything a renderer needs after a state change.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerView {
    pub filter: Filter,
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    pub categories: Vec<CategoryTotal>,
    pub monthly: Vec<MonthlyBucket>,
}

/// Owns the ledger for one session together with its storage and the active
/// list filter. Every successful mutation rewrites the whole stored sequence.
pub struct Session {
    ledger: Ledger,
    filter: Filter,
    storage: Box<dyn StorageBackend>,
    key: String,
}

impl Session {
    pub fn open(storage: Box<dyn StorageBackend>, key: &str) -> Result<Self> {
        Self::open_with_clock(storage, key, Arc::new(SystemClock))
    }

    /// Loads the sequence stored under `key`. Nothing stored yet means an
    /// empty ledger; unreadable or inconsistent data is an error.
    pub fn open_with_clock(
        storage: Box<dyn StorageBackend>,
        key: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let transactions = storage.load(key)?;
        let ledger = Ledger::from_transactions_with_clock(transactions, clock)?;
        info!(key, count = ledger.len(), "ledger session opened");
        Ok(Self {
            ledger,
            filter: Filter::default(),
            storage,
            key: key.to_string(),
        })
    }

    /// Opens a session on the JSON files described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage = JsonStorage::new(Some(config.resolve_data_dir()))?;
        Self::open(Box::new(storage), &config.storage_key)
    }

    pub fn add(&mut self, draft: TransactionDraft) -> Committed<Transaction> {
        let txn = self.ledger.add(draft);
        self.commit(txn)
    }

    /// Parses a submitted form and adds it. Validation errors leave the ledger untouched.
    pub fn add_form(&mut self, form: &TransactionForm) -> Result<Committed<Transaction>> {
        let draft = form.parse()?;
        Ok(self.add(draft))
    }

    /// Deletes `id` if present. Storage is only rewritten when something was removed.
    pub fn delete(&mut self, id: TransactionId) -> Committed<bool> {
        if self.ledger.delete(id) {
            self.commit(true)
        } else {
            Committed {
                value: false,
                storage_warning: None,
            }
        }
    }

    /// Writes the full sequence to storage.
    pub fn persist(&self) -> Result<()> {
        self.storage.save(self.ledger.transactions(), &self.key)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn clear_filter(&mut self) {
        self.filter = Filter::default();
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// An empty entry form dated today.
    pub fn blank_form(&self) -> TransactionForm {
        TransactionForm::reset(self.ledger.clock().today())
    }

    pub fn view(&self) -> LedgerView {
        self.view_at(self.ledger.clock().today())
    }

    /// Snapshot of the filtered list and all aggregates, with the monthly
    /// window ending at `reference`.
    pub fn view_at(&self, reference: NaiveDate) -> LedgerView {
        LedgerView {
            filter: self.filter,
            transactions: self
                .ledger
                .filtered(&self.filter)
                .into_iter()
                .cloned()
                .collect(),
            summary: self.ledger.summary(),
            categories: self.ledger.category_totals(),
            monthly: self.ledger.monthly_totals(reference),
        }
    }

    fn commit<T>(&self, value: T) -> Committed<T> {
        let storage_warning = match self.persist() {
            Ok(()) => None,
            Err(err) => {
                warn!(key = %self.key, error = %err, "ledger changed but could not be saved");
                Some(err)
            }
        };
        Committed {
            value,
            storage_warning,
        }
    }
}
