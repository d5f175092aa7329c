//! Persistence of the transaction sequence behind a small key-value style trait.

pub mod json_backend;
pub mod memory;

use crate::{errors::Result, ledger::Transaction};

/// Key under which the session stores its transactions unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "transactions";

/// Abstraction over backends that keep one serialized transaction sequence per name.
///
/// `save` always receives the whole sequence and replaces whatever was stored.
/// `load` returns an empty sequence when nothing was stored under `name`, and
/// an error when stored data cannot be read back.
pub trait StorageBackend: Send + Sync {
    fn save(&self, transactions: &[Transaction], name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Vec<Transaction>>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
