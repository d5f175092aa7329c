use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::{
    errors::{LedgerError, Result},
    ledger::Transaction,
};

use super::StorageBackend;

/// Key-value blob store held in memory. Values are kept as serialized JSON so
/// loading goes through the same decoding path as on-disk data.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw blob stored under `name`, if any.
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self.blobs()?.get(name).cloned())
    }

    /// Replaces the raw blob under `name`.
    pub fn set(&self, name: &str, blob: impl Into<String>) -> Result<()> {
        self.blobs()?.insert(name.to_string(), blob.into());
        Ok(())
    }

    fn blobs(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| LedgerError::storage("memory storage lock poisoned"))
    }
}

impl StorageBackend for MemoryStorage {
    fn save(&self, transactions: &[Transaction], name: &str) -> Result<()> {
        let blob = serde_json::to_string(transactions)?;
        self.set(name, blob)
    }

    fn load(&self, name: &str) -> Result<Vec<Transaction>> {
        match self.get(name)? {
            Some(blob) => serde_json::from_str(&blob).map_err(|err| {
                LedgerError::storage(format!("stored data under `{name}` is corrupt: {err}"))
            }),
            None => Ok(Vec::new()),
        }
    }
}
