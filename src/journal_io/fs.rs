//! File-backed key-value store: one `<key>.json` file per key inside the data directory.

use super::{CollectionLock, KeyValueStore};
use crate::constants::{
    COLLECTION_FILE_EXTENSION, LOCK_FILE_EXTENSION, LOCK_RETRY_ATTEMPTS, LOCK_RETRY_DELAY_MS,
};
use crate::errors::{AppError, AppResult, LockError, StorageError};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::debug;

#[cfg(unix)]
use crate::constants::{DEFAULT_DIR_PERMISSIONS, DEFAULT_FILE_PERMISSIONS};
#[cfg(unix)]
use std::fs::Permissions;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Ensures the data directory exists, creating it with owner-only permissions.
///
/// # Errors
///
/// Returns `AppError::Journal` if the path is relative, or `AppError::Io` if
/// the directory cannot be created.
pub fn ensure_data_directory_exists(data_dir: &Path) -> AppResult<()> {
    if !data_dir.is_absolute() {
        return Err(AppError::Journal(format!(
            "Data directory path must be absolute: {}",
            data_dir.display()
        )));
    }

    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            fs::set_permissions(data_dir, Permissions::from_mode(DEFAULT_DIR_PERMISSIONS)).map_err(
                |e| {
                    AppError::Io(io::Error::new(
                        e.kind(),
                        format!("Failed to set permissions on data directory: {}", e),
                    ))
                },
            )?;
        }
        debug!("Created data directory {}", data_dir.display());
    }
    Ok(())
}

/// Stores each key as a file under a root directory.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash never leaves a half-written collection.
/// Mutations are serialized across processes with an advisory lock on a
/// sibling `<key>.lock` file.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    /// Opens (and if needed creates) a store rooted at `root`.
    pub fn open(root: &Path) -> AppResult<Self> {
        ensure_data_directory_exists(root)?;
        Ok(FileSystemStore {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        self.file_for(key, COLLECTION_FILE_EXTENSION)
    }

    fn file_for(&self, key: &str, extension: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, extension)))
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

impl KeyValueStore for FileSystemStore {
    fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> AppResult<()> {
        let path = self.path_for(key)?;
        write_atomically(&self.root, &path, value).map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })?;
        debug!(key, bytes = value.len(), "Wrote {}", path.display());
        Ok(())
    }

    fn lock(&self, key: &str) -> AppResult<CollectionLock> {
        let path = self.file_for(key, LOCK_FILE_EXTENSION)?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.clone(),
                source,
            })?;

        #[cfg(unix)]
        file.set_permissions(Permissions::from_mode(DEFAULT_FILE_PERMISSIONS))
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.clone(),
                source,
            })?;

        let contended = fs2::lock_contended_error().raw_os_error();
        for attempt in 1..=LOCK_RETRY_ATTEMPTS {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    debug!(key, attempt, "Acquired collection lock");
                    return Ok(CollectionLock::held(file));
                }
                Err(e) if e.raw_os_error() == contended => {
                    debug!(key, attempt, "Collection lock busy, retrying");
                    thread::sleep(Duration::from_millis(LOCK_RETRY_DELAY_MS));
                }
                Err(source) => {
                    return Err(LockError::AcquisitionFailed { path, source }.into());
                }
            }
        }

        Err(LockError::FileBusy { path }.into())
    }
}

fn write_atomically(dir: &Path, target: &Path, contents: &[u8]) -> io::Result<()> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;

    #[cfg(unix)]
    temp.as_file()
        .set_permissions(Permissions::from_mode(DEFAULT_FILE_PERMISSIONS))?;

    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_missing_directory() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("nested").join("diary");

        let store = FileSystemStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());

        #[cfg(unix)]
        {
            let mode = fs::metadata(&root).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[test]
    fn test_open_rejects_relative_path() {
        let result = FileSystemStore::open(Path::new("relative/diary"));
        match result {
            Err(AppError::Journal(msg)) => assert!(msg.contains("must be absolute")),
            other => panic!("Expected Journal error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let temp = tempdir().unwrap();
        let store = FileSystemStore::open(temp.path()).unwrap();
        assert_eq!(store.get("growth_diary_entries").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let temp = tempdir().unwrap();
        let store = FileSystemStore::open(temp.path()).unwrap();

        store.set("growth_diary_entries", b"[]").unwrap();
        store.set("growth_diary_entries", b"[1]").unwrap();

        assert_eq!(
            store.get("growth_diary_entries").unwrap().as_deref(),
            Some(&b"[1]"[..])
        );
        let path = temp.path().join("growth_diary_entries.json");
        assert_eq!(store.path_for("growth_diary_entries").unwrap(), path);
        assert!(path.exists());

        #[cfg(unix)]
        {
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        // Only the collection file and no stray temporaries
        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["growth_diary_entries.json".to_string()]);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let temp = tempdir().unwrap();
        let store = FileSystemStore::open(temp.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden", "with space"] {
            match store.set(key, b"[]") {
                Err(AppError::Storage(StorageError::InvalidKey(k))) => assert_eq!(k, key),
                other => panic!("Expected InvalidKey for {:?}, got {:?}", key, other),
            }
        }
        assert!(store.get("growth_diary_entries.corrupt-1").is_ok());
    }

    #[test]
    fn test_get_returns_raw_bytes_even_when_not_utf8() {
        let temp = tempdir().unwrap();
        let store = FileSystemStore::open(temp.path()).unwrap();
        fs::write(temp.path().join("growth_diary_entries.json"), [0xff, 0xfe]).unwrap();

        assert_eq!(
            store.get("growth_diary_entries").unwrap(),
            Some(vec![0xff, 0xfe])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_lock_file_is_owner_only() {
        let temp = tempdir().unwrap();
        let store = FileSystemStore::open(temp.path()).unwrap();

        let _guard = store.lock("growth_diary_entries").unwrap();
        let path = temp.path().join("growth_diary_entries.lock");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_lock_is_exclusive_until_dropped() {
        let temp = tempdir().unwrap();
        let first = FileSystemStore::open(temp.path()).unwrap();
        let second = FileSystemStore::open(temp.path()).unwrap();

        let guard = first.lock("growth_diary_entries").unwrap();
        match second.lock("growth_diary_entries") {
            Err(AppError::Lock(LockError::FileBusy { path })) => {
                assert!(path.ends_with("growth_diary_entries.lock"));
            }
            other => panic!("Expected FileBusy, got {:?}", other.map(|_| ())),
        }

        // Other collections are unaffected
        assert!(second.lock("growth_diary_lessons").is_ok());

        drop(guard);
        assert!(second.lock("growth_diary_entries").is_ok());
    }

    #[test]
    fn test_failed_write_surfaces_storage_error() {
        let temp = tempdir().unwrap();
        let store = FileSystemStore::open(temp.path()).unwrap();

        // A directory where the collection file belongs cannot be replaced by rename
        let target = temp.path().join("growth_diary_entries.json");
        fs::create_dir(&target).unwrap();

        let result = store.set("growth_diary_entries", b"[]");
        match result {
            Err(AppError::Storage(StorageError::Write { key, .. })) => {
                assert_eq!(key, "growth_diary_entries");
            }
            other => panic!("Expected Write error, got {:?}", other),
        }
        assert!(target.is_dir());
    }
}
