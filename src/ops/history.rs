//! Recency-ordered, searchable entry history.

use crate::errors::AppResult;
use crate::journal_core::{filter_entries, Entry};
use crate::journal_io::DiaryStore;
use serde::Serialize;
use tracing::info;

/// The history view after searching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History {
    /// Number of entries before filtering
    pub total: usize,
    pub query: String,
    /// Matching entries, most recently written first
    pub entries: Vec<Entry>,
}

/// Orders entries by `created_at`, most recent first. Ties keep their order.
pub fn sort_by_recency(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Lists stored entries newest-written first, keeping those matching `query`.
///
/// An empty query keeps everything.
pub fn search_history(store: &DiaryStore, query: &str) -> AppResult<History> {
    let mut entries = store.list_entries()?;
    sort_by_recency(&mut entries);

    let matching: Vec<Entry> = filter_entries(&entries, query)
        .into_iter()
        .cloned()
        .collect();
    info!(
        total = entries.len(),
        matched = matching.len(),
        "Searched history"
    );

    Ok(History {
        total: entries.len(),
        query: query.to_string(),
        entries: matching,
    })
}
