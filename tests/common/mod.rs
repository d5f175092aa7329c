#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use expense_ledger::{
    core::{Clock, FixedClock},
    ledger::{Category, TransactionDraft, TransactionKind},
    storage::JsonStorage,
    Session,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const KEY: &str = "transactions";

/// Creates a JSON storage backend rooted in a fresh temporary directory.
pub fn temp_storage() -> JsonStorage {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonStorage::new(Some(base)).expect("create json storage backend")
}

pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::on(2024, 6, 10).expect("valid date"))
}

/// Session over a fresh temp directory with the clock frozen at 2024-06-10.
pub fn setup_session() -> (Session, JsonStorage) {
    let storage = temp_storage();
    let session = Session::open_with_clock(Box::new(storage.clone()), KEY, fixed_clock())
        .expect("open session");
    (session, storage)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn draft(
    description: &str,
    amount: f64,
    category: Category,
    kind: TransactionKind,
    on: NaiveDate,
) -> TransactionDraft {
    TransactionDraft::new(description, amount, category, kind, on).expect("valid draft")
}
