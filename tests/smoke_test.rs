use chrono::NaiveDate;
use money_manager::{
    core::{export, store::TransactionStore, summary},
    domain::{CategoryRegistry, TransactionDraft, TransactionKind},
    init,
    storage::MemoryStore,
};

#[test]
fn record_summarize_export_smoke() {
    init();

    let mut store = TransactionStore::open(Box::new(MemoryStore::new())).unwrap();
    store
        .add(TransactionDraft {
            kind: TransactionKind::Income,
            category: "salary".to_string(),
            amount: 300000.0,
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        })
        .unwrap();
    store
        .add(TransactionDraft {
            kind: TransactionKind::Expense,
            category: "food".to_string(),
            amount: 45000.0,
            description: "ランチ".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        })
        .unwrap();

    assert_eq!(summary::overall_balance(store.records()), 255000.0);

    let bytes = export::csv_bytes(store.records(), CategoryRegistry::global()).unwrap();
    assert!(bytes.starts_with(&[0xef, 0xbb, 0xbf]));
    assert_eq!(String::from_utf8_lossy(&bytes).lines().count(), 3);
}
