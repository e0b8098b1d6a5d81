pub mod json_store;
pub mod memory;

use std::sync::Arc;

use crate::errors::StoreResult;

/// Abstraction over key/value persistence for serialized documents.
///
/// The store owns whole documents; callers serialize and deserialize around
/// it. Keys are logical names, not paths.
pub trait BlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;
    fn delete(&self, key: &str) -> StoreResult<()>;
}

/// Shared handles read and write through the same backing store.
impl<S: BlobStore + ?Sized> BlobStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
