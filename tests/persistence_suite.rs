mod common;

use common::{draft, reopen_store, seed_scenario, store_in_temp_dir};
use money_manager::core::store::STORAGE_KEY;
use money_manager::domain::TransactionKind;

#[test]
fn records_survive_a_reopen_bit_for_bit() {
    let (mut store, base) = store_in_temp_dir();
    seed_scenario(&mut store);
    let written = store.records().to_vec();

    let reopened = reopen_store(&base);
    assert_eq!(reopened.records(), written.as_slice());
}

#[test]
fn edits_and_deletes_are_visible_after_reopen() {
    let (mut store, base) = store_in_temp_dir();
    seed_scenario(&mut store);
    let income_id = store.records()[0].id;
    let expense_id = store.records()[1].id;

    store
        .update(
            income_id,
            draft(TransactionKind::Income, "bonus", 500000.0, "冬の賞与", (2024, 1, 20)),
        )
        .expect("update income");
    store.remove(expense_id).expect("remove expense");

    let reopened = reopen_store(&base);
    assert_eq!(reopened.len(), 1);
    let survivor = &reopened.records()[0];
    assert_eq!(survivor.id, income_id);
    assert_eq!(survivor.category, "bonus");
    assert_eq!(survivor.amount, 500000.0);
}

#[test]
fn stored_document_uses_the_browser_field_layout() {
    let (mut store, base) = store_in_temp_dir();
    seed_scenario(&mut store);

    let raw = std::fs::read_to_string(base.join(format!("{STORAGE_KEY}.json")))
        .expect("stored document exists");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("stored document is json");
    let first = &value.as_array().expect("top level array")[0];
    assert_eq!(first["type"], "income");
    assert!(first.get("timestamp").is_some());
    assert!(first.get("kind").is_none());
    assert_eq!(first["date"], "2024-01-05");
}

#[test]
fn a_corrupted_document_resets_to_empty_without_failing() {
    let (mut store, base) = store_in_temp_dir();
    seed_scenario(&mut store);

    std::fs::write(base.join(format!("{STORAGE_KEY}.json")), "{broken").expect("corrupt file");
    let reopened = reopen_store(&base);
    assert!(reopened.is_empty());

    // The next mutation rewrites a clean document.
    let mut reopened = reopened;
    reopened
        .add(draft(TransactionKind::Expense, "food", 1200.0, "", (2024, 2, 1)))
        .expect("add after corruption");
    let recovered = reopen_store(&base);
    assert_eq!(recovered.len(), 1);
}
