//! In-memory key-value store for tests and throwaway sessions.

use super::{CollectionLock, KeyValueStore};
use crate::errors::{AppResult, StorageError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

/// Keeps every key in a shared map.
///
/// Clones share the same contents, so a test can hand one clone to a
/// [`DiaryStore`](super::DiaryStore) and inspect the raw values through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    reject_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, as a full or read-only disk would.
    pub fn fail_writes(&self, fail: bool) {
        self.reject_writes.set(fail);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> AppResult<()> {
        if self.reject_writes.get() {
            return Err(StorageError::Write {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            }
            .into());
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn lock(&self, _key: &str) -> AppResult<CollectionLock> {
        Ok(CollectionLock::unshared())
    }
}
