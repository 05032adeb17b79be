//! Journal persistence.
//!
//! Records live in a small key-value store holding one JSON array per
//! collection (`growth_diary_entries`, `growth_diary_lessons`). Every
//! mutation is a locked read-modify-write of the whole collection, so a
//! collection on disk is always a complete snapshot.
//!
//! The backend sits behind the [`KeyValueStore`] trait: [`FileSystemStore`]
//! keeps each collection in its own file, [`MemoryStore`] keeps everything in
//! memory for tests. [`DiaryStore`] is the handle the rest of the application
//! receives.
//!
//! Unreadable persisted data (malformed JSON or bytes that are not UTF-8) is
//! treated as an empty collection when reading. Before a write replaces it,
//! the raw bytes are copied to the first free `<key>.corrupt-<n>` key so no
//! earlier backup is ever overwritten. Write failures are always returned to
//! the caller.

mod fs;
mod memory;

pub use fs::{ensure_data_directory_exists, FileSystemStore};
pub use memory::MemoryStore;

use crate::constants::{CORRUPT_KEY_SUFFIX, ENTRIES_KEY, LESSONS_KEY};
use crate::errors::{AppResult, StorageError};
use crate::journal_core::{Entry, Lesson};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, warn};

/// Durable byte storage addressed by key.
///
/// Values are opaque bytes; decoding them is up to the caller.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if nothing was ever stored.
    fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Replaces the value under `key`. Readers see either the old or the new
    /// value, never a mix.
    fn set(&self, key: &str, value: &[u8]) -> AppResult<()>;

    /// Takes the exclusive write lock for `key`, held until the guard is dropped.
    fn lock(&self, key: &str) -> AppResult<CollectionLock>;
}

/// Exclusive hold on one collection, released on drop.
pub struct CollectionLock {
    file: Option<std::fs::File>,
}

impl CollectionLock {
    /// A guard for backends that cannot be shared between processes.
    pub fn unshared() -> Self {
        CollectionLock { file: None }
    }

    pub(crate) fn held(file: std::fs::File) -> Self {
        CollectionLock { file: Some(file) }
    }
}

impl Drop for CollectionLock {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            // Closing the file releases the lock as well
            if let Err(e) = fs2::FileExt::unlock(file) {
                debug!("Failed to release collection lock explicitly: {}", e);
            }
        }
    }
}

/// A record type persisted as its own collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Storage key of the collection.
    const KEY: &'static str;

    /// Identifier unique within the collection.
    fn id(&self) -> &str;
}

impl Record for Entry {
    const KEY: &'static str = ENTRIES_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Lesson {
    const KEY: &'static str = LESSONS_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

/// List, upsert and delete for one collection.
pub struct Collection<'a, T> {
    backend: &'a dyn KeyValueStore,
    _record: PhantomData<T>,
}

impl<'a, T: Record> Collection<'a, T> {
    pub fn new(backend: &'a dyn KeyValueStore) -> Self {
        Collection {
            backend,
            _record: PhantomData,
        }
    }

    /// All records in persisted order.
    ///
    /// Returns an empty list when nothing has been stored yet or when the
    /// stored data cannot be decoded.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read.
    pub fn list(&self) -> AppResult<Vec<T>> {
        let records = match self.backend.get(T::KEY)? {
            Some(raw) => decode_or_empty(&raw),
            None => Vec::new(),
        };
        debug!(key = T::KEY, count = records.len(), "Listed collection");
        Ok(records)
    }

    /// The record with the given id, if any.
    pub fn find(&self, id: &str) -> AppResult<Option<T>> {
        Ok(self.list()?.into_iter().find(|record| record.id() == id))
    }

    /// Replaces the record with the same id in place, or appends it.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be locked, encoded or written.
    /// The persisted collection is unchanged in that case.
    pub fn upsert(&self, record: &T) -> AppResult<()> {
        let replaced = self.rewrite(|records| {
            match records.iter().position(|existing| existing.id() == record.id()) {
                Some(index) => {
                    records[index] = record.clone();
                    true
                }
                None => {
                    records.push(record.clone());
                    false
                }
            }
        })?;
        debug!(key = T::KEY, id = record.id(), replaced, "Upserted record");
        Ok(())
    }

    /// Removes the record with the given id. Returns whether anything was removed.
    ///
    /// Deleting an unknown id is not an error.
    pub fn delete(&self, id: &str) -> AppResult<bool> {
        let removed = self.rewrite(|records| {
            let before = records.len();
            records.retain(|record| record.id() != id);
            records.len() != before
        })?;
        debug!(key = T::KEY, id, removed, "Deleted record");
        Ok(removed)
    }

    fn rewrite<R>(&self, change: impl FnOnce(&mut Vec<T>) -> R) -> AppResult<R> {
        let _lock = self.backend.lock(T::KEY)?;

        let mut records: Vec<T> = match self.backend.get(T::KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_slice(&raw) {
                Ok(records) => records,
                Err(e) => {
                    let backup_key = self.free_backup_key()?;
                    warn!(
                        key = T::KEY,
                        backup = %backup_key,
                        "Persisted collection is unreadable ({}); preserving it before overwriting",
                        e
                    );
                    self.backend.set(&backup_key, &raw)?;
                    Vec::new()
                }
            },
        };

        let outcome = change(&mut records);

        let encoded = serde_json::to_vec(&records).map_err(|source| StorageError::Encode {
            key: T::KEY.to_string(),
            source,
        })?;
        self.backend.set(T::KEY, &encoded)?;
        Ok(outcome)
    }

    /// First `<key>.corrupt-<n>` with nothing stored under it yet.
    fn free_backup_key(&self) -> AppResult<String> {
        let mut n: u32 = 1;
        loop {
            let candidate = backup_key(T::KEY, n);
            if self.backend.get(&candidate)?.is_none() {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

/// Key of the `n`th preserved copy of a corrupt collection.
pub fn backup_key(key: &str, n: u32) -> String {
    format!("{}{}-{}", key, CORRUPT_KEY_SUFFIX, n)
}

// Bytes that are not UTF-8 fail here like any other malformed JSON.
fn decode_or_empty<T: DeserializeOwned>(raw: &[u8]) -> Vec<T> {
    serde_json::from_slice(raw).unwrap_or_else(|e| {
        warn!("Persisted collection is unreadable, treating it as empty: {}", e);
        Vec::new()
    })
}

/// The diary's storage handle: one entry collection and one lesson collection
/// over a shared backend.
///
/// Build it once at startup and pass it to every operation that needs storage.
///
/// # Examples
///
/// ```
/// use growth_diary::journal_io::DiaryStore;
///
/// let store = DiaryStore::in_memory();
/// assert!(store.list_entries().unwrap().is_empty());
/// assert!(!store.delete_entry("missing").unwrap());
/// ```
pub struct DiaryStore {
    backend: Box<dyn KeyValueStore>,
}

impl DiaryStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        DiaryStore { backend }
    }

    /// Opens a file-backed store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is relative or the directory cannot be created.
    pub fn open(data_dir: &Path) -> AppResult<Self> {
        Ok(Self::new(Box::new(FileSystemStore::open(data_dir)?)))
    }

    /// A store that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn entries(&self) -> Collection<'_, Entry> {
        Collection::new(self.backend.as_ref())
    }

    pub fn lessons(&self) -> Collection<'_, Lesson> {
        Collection::new(self.backend.as_ref())
    }

    pub fn list_entries(&self) -> AppResult<Vec<Entry>> {
        self.entries().list()
    }

    pub fn find_entry(&self, id: &str) -> AppResult<Option<Entry>> {
        self.entries().find(id)
    }

    pub fn upsert_entry(&self, entry: &Entry) -> AppResult<()> {
        self.entries().upsert(entry)
    }

    pub fn delete_entry(&self, id: &str) -> AppResult<bool> {
        self.entries().delete(id)
    }

    pub fn list_lessons(&self) -> AppResult<Vec<Lesson>> {
        self.lessons().list()
    }

    pub fn upsert_lesson(&self, lesson: &Lesson) -> AppResult<()> {
        self.lessons().upsert(lesson)
    }

    pub fn delete_lesson(&self, id: &str) -> AppResult<bool> {
        self.lessons().delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::journal_core::Mood;
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, content: &str) -> Entry {
        Entry {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            content: content.to_string(),
            mood: Some(Mood::Okay),
            lessons: Some(vec!["one".to_string()]),
            created_at: 1_704_099_600_000,
        }
    }

    fn lesson(id: &str, entry_id: Option<&str>) -> Lesson {
        Lesson {
            id: id.to_string(),
            content: format!("lesson {}", id),
            entry_id: entry_id.map(String::from),
            created_at: 1,
        }
    }

    fn store_with(backend: &MemoryStore) -> DiaryStore {
        DiaryStore::new(Box::new(backend.clone()))
    }

    #[test]
    fn test_list_is_empty_when_nothing_persisted() {
        let store = DiaryStore::in_memory();
        assert!(store.list_entries().unwrap().is_empty());
        assert!(store.list_lessons().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_then_list_round_trips() {
        let store = DiaryStore::in_memory();
        let original = entry("a", "First entry");
        store.upsert_entry(&original).unwrap();

        let listed = store.list_entries().unwrap();
        assert_eq!(listed, vec![original.clone()]);
        assert_eq!(store.find_entry("a").unwrap(), Some(original));
        assert_eq!(store.find_entry("b").unwrap(), None);
    }

    #[test]
    fn test_upsert_same_id_replaces_in_place() {
        let store = DiaryStore::in_memory();
        store.upsert_entry(&entry("a", "one")).unwrap();
        store.upsert_entry(&entry("b", "two")).unwrap();
        store.upsert_entry(&entry("c", "three")).unwrap();

        store.upsert_entry(&entry("b", "two, revised")).unwrap();

        let listed = store.list_entries().unwrap();
        let summary: Vec<(&str, &str)> = listed
            .iter()
            .map(|e| (e.id.as_str(), e.content.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("a", "one"), ("b", "two, revised"), ("c", "three")]
        );
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = DiaryStore::in_memory();
        store.upsert_entry(&entry("a", "one")).unwrap();
        store.upsert_entry(&entry("b", "two")).unwrap();

        assert!(store.delete_entry("a").unwrap());
        assert!(!store.delete_entry("a").unwrap());
        assert!(!store.delete_entry("never-existed").unwrap());

        let ids: Vec<String> = store.list_entries().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b".to_string()]);
    }

    #[test]
    fn test_collections_are_independent() {
        let backend = MemoryStore::new();
        let store = store_with(&backend);

        store.upsert_entry(&entry("e1", "content")).unwrap();
        store.upsert_lesson(&lesson("l1", Some("e1"))).unwrap();

        // No cascade in either direction
        store.delete_entry("e1").unwrap();
        assert_eq!(store.list_lessons().unwrap().len(), 1);
        assert_eq!(
            store.list_lessons().unwrap()[0].entry_id.as_deref(),
            Some("e1")
        );

        assert!(backend.get(ENTRIES_KEY).unwrap().is_some());
        assert!(backend.get(LESSONS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_persisted_form_is_a_json_array() {
        let backend = MemoryStore::new();
        let store = store_with(&backend);
        store.upsert_lesson(&lesson("l1", None)).unwrap();

        let raw = backend.get(LESSONS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["id"], "l1");
        assert_eq!(value[0]["createdAt"], 1);
    }

    #[test]
    fn test_corrupt_data_reads_as_empty() {
        let backend = MemoryStore::new();
        backend.set(ENTRIES_KEY, b"{not json").unwrap();
        let store = store_with(&backend);

        assert!(store.list_entries().unwrap().is_empty());
        assert_eq!(store.find_entry("a").unwrap(), None);
    }

    #[test]
    fn test_corrupt_data_is_preserved_before_overwrite() {
        let backend = MemoryStore::new();
        backend.set(ENTRIES_KEY, b"{not json").unwrap();
        let store = store_with(&backend);

        store.upsert_entry(&entry("a", "fresh start")).unwrap();

        assert_eq!(
            backend.get(&backup_key(ENTRIES_KEY, 1)).unwrap().as_deref(),
            Some(&b"{not json"[..])
        );
        assert_eq!(store.list_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_non_utf8_data_reads_as_empty_and_is_preserved() {
        let backend = MemoryStore::new();
        backend.set(LESSONS_KEY, &[0x5b, 0xff, 0xfe, 0x5d]).unwrap();
        let store = store_with(&backend);

        assert!(store.list_lessons().unwrap().is_empty());
        store.upsert_lesson(&lesson("l1", None)).unwrap();

        assert_eq!(
            backend.get(&backup_key(LESSONS_KEY, 1)).unwrap().as_deref(),
            Some(&[0x5b, 0xff, 0xfe, 0x5d][..])
        );
        assert_eq!(store.list_lessons().unwrap().len(), 1);
    }

    #[test]
    fn test_repeated_corruption_keeps_every_backup() {
        let backend = MemoryStore::new();
        let store = store_with(&backend);

        backend.set(ENTRIES_KEY, b"first broken payload").unwrap();
        store.upsert_entry(&entry("a", "one")).unwrap();
        backend.set(ENTRIES_KEY, b"second broken payload").unwrap();
        store.upsert_entry(&entry("b", "two")).unwrap();

        assert_eq!(
            backend.get(&backup_key(ENTRIES_KEY, 1)).unwrap().as_deref(),
            Some(&b"first broken payload"[..])
        );
        assert_eq!(
            backend.get(&backup_key(ENTRIES_KEY, 2)).unwrap().as_deref(),
            Some(&b"second broken payload"[..])
        );
        let ids: Vec<String> = store.list_entries().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b".to_string()]);
    }

    #[test]
    fn test_failed_write_surfaces_error_and_keeps_previous_data() {
        let backend = MemoryStore::new();
        let store = store_with(&backend);
        store.upsert_entry(&entry("a", "kept")).unwrap();

        backend.fail_writes(true);
        let result = store.upsert_entry(&entry("b", "lost?"));
        assert!(matches!(result, Err(AppError::Storage(StorageError::Write { .. }))));

        let result = store.delete_entry("a");
        assert!(result.is_err());

        backend.fail_writes(false);
        let ids: Vec<String> = store.list_entries().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a".to_string()]);
    }
}
