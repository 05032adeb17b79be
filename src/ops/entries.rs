//! Looking up and deleting single entries.

use crate::errors::AppResult;
use crate::journal_core::Entry;
use crate::journal_io::DiaryStore;
use tracing::info;

/// The entry with the given id, or `None` if it does not exist.
pub fn show_entry(store: &DiaryStore, id: &str) -> AppResult<Option<Entry>> {
    store.find_entry(id)
}

/// Deletes an entry, returning whether it existed.
///
/// Standalone lessons that reference the entry are left alone.
pub fn remove_entry(store: &DiaryStore, id: &str) -> AppResult<bool> {
    let removed = store.delete_entry(id)?;
    if removed {
        info!(entry_id = id, "Deleted entry");
    } else {
        info!(entry_id = id, "No entry to delete");
    }
    Ok(removed)
}
