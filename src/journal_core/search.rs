//! Case-insensitive substring search over entries.

use super::entry::Entry;

/// Returns the entries matching `query`, in input order.
///
/// An entry matches when the lowercased query is a substring of its
/// lowercased content or of any of its lessons. An empty query matches
/// every entry. Callers sort before filtering; this never reorders.
///
/// # Examples
///
/// ```
/// use growth_diary::journal_core::{filter_entries, Entry};
/// use chrono::Utc;
///
/// let entry = Entry {
///     id: "1".to_string(),
///     date: Utc::now(),
///     content: "Had a Great Day".to_string(),
///     mood: None,
///     lessons: Some(vec!["Patience pays off".to_string()]),
///     created_at: 0,
/// };
/// let entries = vec![entry];
///
/// assert_eq!(filter_entries(&entries, "PATIENCE").len(), 1);
/// assert!(filter_entries(&entries, "xyz").is_empty());
/// ```
pub fn filter_entries<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| contains_needle(entry, &needle))
        .collect()
}

/// Whether a single entry matches `query` under the same rules as [`filter_entries`].
pub fn matches_query(entry: &Entry, query: &str) -> bool {
    contains_needle(entry, &query.to_lowercase())
}

fn contains_needle(entry: &Entry, needle: &str) -> bool {
    entry.content.to_lowercase().contains(needle)
        || entry
            .lessons()
            .iter()
            .any(|lesson| lesson.to_lowercase().contains(needle))
}
