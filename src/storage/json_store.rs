//! File-backed blob store keeping one JSON document per key.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::StoreResult;
use crate::storage::BlobStore;

/// Stores each key as `<base>/<key>.json`.
pub struct JsonFileStore {
    base: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `base`, creating the directory when missing.
    pub fn open(base: impl Into<PathBuf>) -> StoreResult<Self> {
        let base = base.into();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{}.json", file_stem(key)))
    }
}

impl BlobStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        write_atomic(&self.entry_path(key), value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Restricts keys to a filesystem-safe alphabet.
fn file_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "blob".to_string()
    } else {
        stem
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

/// Writes through a sibling temp file plus rename so a crash mid-write
/// never leaves a truncated document behind.
fn write_atomic(path: &Path, contents: &str) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
