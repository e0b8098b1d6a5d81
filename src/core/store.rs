//! Persistent transaction collection behind a [`BlobStore`].
//!
//! The whole collection lives in memory and every mutation rewrites the
//! stored document, mirroring how the original app persisted its array on
//! each change.

use tracing::{debug, warn};

use crate::domain::{Transaction, TransactionDraft};
use crate::errors::{StoreError, StoreResult};
use crate::storage::BlobStore;

/// Blob key the transaction array is stored under. Kept verbatim from the
/// browser app so its exported data loads directly.
pub const STORAGE_KEY: &str = "moneyManagerTransactions";

pub struct TransactionStore {
    records: Vec<Transaction>,
    blob: Box<dyn BlobStore>,
}

impl TransactionStore {
    /// Loads existing records from `blob`. Malformed stored data is logged
    /// and treated as empty rather than failing startup.
    pub fn open(blob: Box<dyn BlobStore>) -> StoreResult<Self> {
        let records = match blob.get(STORAGE_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<Transaction>>(&raw) {
                Ok(records) => records,
                Err(err) => {
                    warn!(error = %err, "discarding unreadable transaction data");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        debug!(count = records.len(), "transaction store opened");
        Ok(Self { records, blob })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.records.iter().find(|t| t.id == id)
    }

    /// Appends a record built from `draft` and persists the collection.
    pub fn add(&mut self, draft: TransactionDraft) -> StoreResult<Transaction> {
        let id = self.next_id();
        let record = Transaction::new(id, draft);
        self.records.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Rewrites the editable fields of the record with `id` and persists.
    pub fn update(&mut self, id: i64, draft: TransactionDraft) -> StoreResult<Transaction> {
        let record = self
            .records
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.apply(draft);
        let updated = record.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Removes the record with `id`, returning how many records matched.
    /// Unknown ids leave the collection unchanged; the result is persisted
    /// either way.
    pub fn remove(&mut self, id: i64) -> StoreResult<usize> {
        let before = self.records.len();
        self.records.retain(|t| t.id != id);
        let removed = before - self.records.len();
        self.persist()?;
        Ok(removed)
    }

    /// Drops every record and persists the empty collection.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.records.clear();
        self.persist()
    }

    /// Millisecond clock value, bumped past the current maximum id so that
    /// several records created within one millisecond stay unique.
    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let ceiling = self.records.iter().map(|t| t.id).max().unwrap_or(0);
        now.max(ceiling + 1)
    }

    fn persist(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        self.blob.put(STORAGE_KEY, &json)?;
        debug!(count = self.records.len(), "transactions persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::TransactionKind;
    use crate::storage::MemoryStore;

    fn draft(kind: TransactionKind, category: &str, amount: f64, day: u32) -> TransactionDraft {
        TransactionDraft {
            kind,
            category: category.to_string(),
            amount,
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    fn open_shared() -> (TransactionStore, Arc<MemoryStore>) {
        let blob = Arc::new(MemoryStore::new());
        let store = TransactionStore::open(Box::new(blob.clone())).unwrap();
        (store, blob)
    }

    #[test]
    fn starts_empty_without_stored_data() {
        let (store, _) = open_shared();
        assert!(store.is_empty());
    }

    #[test]
    fn add_assigns_unique_increasing_ids() {
        let (mut store, _) = open_shared();
        let a = store.add(draft(TransactionKind::Income, "salary", 300000.0, 5)).unwrap();
        let b = store.add(draft(TransactionKind::Expense, "food", 45000.0, 10)).unwrap();
        let c = store.add(draft(TransactionKind::Expense, "food", 1200.0, 11)).unwrap();
        assert!(a.id < b.id && b.id < c.id);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn every_mutation_persists_the_whole_collection() {
        let (mut store, blob) = open_shared();
        let kept = store.add(draft(TransactionKind::Income, "salary", 300000.0, 5)).unwrap();
        let gone = store.add(draft(TransactionKind::Expense, "food", 500.0, 6)).unwrap();

        store.remove(gone.id).unwrap();
        let raw = blob.get(STORAGE_KEY).unwrap().unwrap();
        let stored: Vec<Transaction> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, kept.id);
    }

    #[test]
    fn reopen_reads_back_identical_records() {
        let blob = Arc::new(MemoryStore::new());
        let mut store = TransactionStore::open(Box::new(blob.clone())).unwrap();
        let mut d = draft(TransactionKind::Expense, "food", 45000.0, 10);
        d.description = "ランチ, 会議".to_string();
        let written = store.add(d).unwrap();

        let reopened = TransactionStore::open(Box::new(blob)).unwrap();
        assert_eq!(reopened.records(), &[written]);
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let (mut store, _) = open_shared();
        let original = store.add(draft(TransactionKind::Expense, "food", 500.0, 6)).unwrap();
        let updated = store
            .update(original.id, draft(TransactionKind::Income, "salary", 1000.0, 7))
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.kind, TransactionKind::Income);
        assert_eq!(updated.amount, 1000.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_unknown_id_is_an_error() {
        let (mut store, _) = open_shared();
        let err = store
            .update(12345, draft(TransactionKind::Expense, "food", 1.0, 1))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(12345)));
    }

    #[test]
    fn remove_unknown_id_is_a_quiet_noop() {
        let (mut store, blob) = open_shared();
        store.add(draft(TransactionKind::Expense, "food", 500.0, 6)).unwrap();
        assert_eq!(store.remove(999).unwrap(), 0);
        assert_eq!(store.len(), 1);
        // The untouched collection is still rewritten.
        assert!(blob.get(STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn remove_from_an_empty_store_returns_zero() {
        let (mut store, _) = open_shared();
        assert_eq!(store.remove(1).unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn clear_persists_an_empty_array() {
        let (mut store, blob) = open_shared();
        store.add(draft(TransactionKind::Expense, "food", 500.0, 6)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        let raw = blob.get(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn malformed_stored_data_loads_as_empty() {
        let blob = MemoryStore::with_entry(STORAGE_KEY, "{definitely not json");
        let store = TransactionStore::open(Box::new(blob)).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn browser_exported_array_loads_directly() {
        let raw = r#"[{
            "id": 1704412800000,
            "type": "income",
            "category": "salary",
            "amount": 300000,
            "description": "",
            "date": "2024-01-05",
            "timestamp": "2024-01-05T03:00:00.000Z"
        }]"#;
        let blob = MemoryStore::with_entry(STORAGE_KEY, raw);
        let store = TransactionStore::open(Box::new(blob)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].category, "salary");
    }
}
