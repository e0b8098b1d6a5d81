use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use money_manager::core::store::TransactionStore;
use money_manager::domain::{TransactionDraft, TransactionKind};
use money_manager::storage::JsonFileStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a store backed by a unique temporary directory and returns the
/// directory path so tests can reopen or inspect it.
pub fn store_in_temp_dir() -> (TransactionStore, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let blob = JsonFileStore::open(&base).expect("open json blob store");
    let store = TransactionStore::open(Box::new(blob)).expect("open transaction store");
    (store, base)
}

/// Reopens a store over an existing directory.
pub fn reopen_store(base: &PathBuf) -> TransactionStore {
    let blob = JsonFileStore::open(base).expect("reopen json blob store");
    TransactionStore::open(Box::new(blob)).expect("reopen transaction store")
}

pub fn draft(
    kind: TransactionKind,
    category: &str,
    amount: f64,
    description: &str,
    date: (i32, u32, u32),
) -> TransactionDraft {
    TransactionDraft {
        kind,
        category: category.to_string(),
        amount,
        description: description.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid test date"),
    }
}

/// The two-record scenario used across suites: one salary payment and one
/// grocery expense in January 2024.
pub fn seed_scenario(store: &mut TransactionStore) {
    store
        .add(draft(TransactionKind::Income, "salary", 300000.0, "", (2024, 1, 5)))
        .expect("seed income");
    store
        .add(draft(TransactionKind::Expense, "food", 45000.0, "ランチ", (2024, 1, 10)))
        .expect("seed expense");
}
