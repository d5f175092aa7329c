mod common;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use common::{date, draft, KEY};
use expense_ledger::{
    config::{Config, ConfigManager},
    ledger::{Category, Filter, Transaction, TransactionForm, TransactionKind},
    storage::{MemoryStorage, StorageBackend},
    LedgerError, Result, Session,
};

/// Backend whose writes can be switched off to simulate a full or unavailable store.
#[derive(Clone, Default)]
struct FlakyStorage {
    inner: Arc<MemoryStorage>,
    broken: Arc<AtomicBool>,
}

impl StorageBackend for FlakyStorage {
    fn save(&self, transactions: &[Transaction], name: &str) -> Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(LedgerError::storage("quota exceeded"));
        }
        self.inner.save(transactions, name)
    }

    fn load(&self, name: &str) -> Result<Vec<Transaction>> {
        self.inner.load(name)
    }
}

#[test]
fn form_submission_flows_into_view() {
    let (mut session, _storage) = common::setup_session();
    let mut form = session.blank_form();
    assert_eq!(form.kind, "expense");
    form.description = "  Coffee ".into();
    form.amount = "4.50".into();
    form.category = "food".into();
    form.date = "2024-06-03".into();
    let committed = session.add_form(&form).expect("valid form");
    assert!(committed.is_persisted());

    let paycheck = TransactionForm {
        description: "Paycheck".into(),
        amount: "2000".into(),
        category: "salary".into(),
        kind: "income".into(),
        date: "2024-05-31".into(),
    };
    session.add_form(&paycheck).expect("valid form");

    let view = session.view();
    assert_eq!(view.transactions.len(), 2);
    assert_eq!(view.transactions[0].description, "Paycheck");
    assert_eq!(view.summary.balance, 1995.5);
    assert_eq!(view.categories.len(), 1);
    assert_eq!(view.monthly.len(), 6);
    assert_eq!(view.monthly[4].income, 2000.0);
    assert_eq!(view.monthly[5].expense, 4.5);
}

#[test]
fn filter_changes_list_but_not_totals() {
    let (mut session, _storage) = common::setup_session();
    session.add(draft("Coffee", 4.5, Category::Food, TransactionKind::Expense, date(2024, 1, 15)));
    session.add(draft(
        "Paycheck",
        2000.0,
        Category::Salary,
        TransactionKind::Income,
        date(2024, 1, 20),
    ));

    let unfiltered = session.view();
    session.set_filter(Filter::category(Category::Food));
    let filtered = session.view();
    assert_eq!(filtered.transactions.len(), 1);
    assert_eq!(filtered.transactions[0].description, "Coffee");
    assert_eq!(filtered.summary, unfiltered.summary);
    assert_eq!(filtered.categories, unfiltered.categories);
    assert_eq!(filtered.monthly, unfiltered.monthly);

    session.clear_filter();
    assert!(session.filter().is_cleared());
    assert_eq!(session.view().transactions.len(), 2);
}

#[test]
fn storage_failure_is_reported_and_session_stays_authoritative() {
    let storage = FlakyStorage::default();
    let mut session =
        Session::open_with_clock(Box::new(storage.clone()), KEY, common::fixed_clock()).unwrap();
    let kept = session
        .add(draft("Rent", 950.0, Category::Bills, TransactionKind::Expense, date(2024, 6, 1)))
        .value;

    storage.broken.store(true, Ordering::SeqCst);
    let committed = session.add(draft(
        "Lunch",
        12.0,
        Category::Food,
        TransactionKind::Expense,
        date(2024, 6, 2),
    ));
    let warning = committed.storage_warning.expect("save failure must be surfaced");
    assert!(warning.is_storage());
    assert!(warning.to_string().contains("quota exceeded"));
    assert_eq!(session.ledger().len(), 2);
    assert_eq!(storage.inner.load(KEY).unwrap().len(), 1);

    let removed = session.delete(kept.id);
    assert!(removed.value);
    assert!(!removed.is_persisted());
    assert_eq!(session.ledger().len(), 1);

    storage.broken.store(false, Ordering::SeqCst);
    session.persist().expect("retry succeeds");
    let stored = storage.inner.load(KEY).unwrap();
    assert_eq!(stored, session.ledger().transactions());
}

#[test]
fn session_opens_from_saved_config() {
    let temp = tempfile::tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let config = Config {
        data_dir: Some(temp.path().join("data")),
        storage_key: "household".into(),
        ..Config::default()
    };
    manager.save(&config).unwrap();

    let loaded = manager.load().unwrap();
    let mut session = Session::from_config(&loaded).expect("open from config");
    assert_eq!(session.key(), "household");
    assert!(session.ledger().is_empty());
    session.add(draft(
        "Book",
        25.0,
        Category::Education,
        TransactionKind::Expense,
        date(2024, 3, 3),
    ));

    let reopened = Session::from_config(&loaded).unwrap();
    assert_eq!(reopened.ledger().len(), 1);
    assert!(temp.path().join("data").join("ledgers").join("household.json").exists());
}
