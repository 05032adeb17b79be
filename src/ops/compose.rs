//! Composing and saving new entries.

use crate::errors::{AppError, AppResult};
use crate::journal_core::{Entry, Mood};
use crate::journal_io::DiaryStore;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

/// What the writer typed in, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub content: String,
    pub mood: Option<Mood>,
    pub lessons: Vec<String>,
    /// When the entry is about; defaults to the moment it is composed
    pub date: Option<DateTime<Utc>>,
}

/// Turns a draft into an entry ready to be stored.
///
/// Content and lessons are trimmed, blank lessons are dropped and an empty
/// lesson list becomes `None`. The entry gets a fresh UUID and `created_at`
/// set from `now`.
///
/// # Errors
///
/// Returns `AppError::Validation` if the content is empty after trimming.
///
/// # Examples
///
/// ```
/// use growth_diary::ops::{compose_entry, EntryDraft};
/// use chrono::Utc;
///
/// let draft = EntryDraft {
///     content: "  Walked in the rain  ".to_string(),
///     lessons: vec!["  ".to_string(), " Slow down ".to_string()],
///     ..Default::default()
/// };
///
/// let entry = compose_entry(draft, Utc::now()).unwrap();
/// assert_eq!(entry.content, "Walked in the rain");
/// assert_eq!(entry.lessons, Some(vec!["Slow down".to_string()]));
///
/// assert!(compose_entry(EntryDraft::default(), Utc::now()).is_err());
/// ```
pub fn compose_entry(draft: EntryDraft, now: DateTime<Utc>) -> AppResult<Entry> {
    let content = draft.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation(
            "Entry content cannot be empty".to_string(),
        ));
    }

    let lessons: Vec<String> = draft
        .lessons
        .iter()
        .map(|lesson| lesson.trim())
        .filter(|lesson| !lesson.is_empty())
        .map(String::from)
        .collect();

    Ok(Entry {
        id: Uuid::new_v4().to_string(),
        date: draft.date.unwrap_or(now),
        content: content.to_string(),
        mood: draft.mood,
        lessons: if lessons.is_empty() { None } else { Some(lessons) },
        created_at: now.timestamp_millis(),
    })
}

/// Composes a draft and persists it, returning the stored entry.
///
/// # Errors
///
/// Validation errors are returned before the store is touched. Storage and
/// lock errors from the write are returned as-is; the entry is not saved in
/// that case.
pub fn save_new_entry(
    store: &DiaryStore,
    draft: EntryDraft,
    now: DateTime<Utc>,
) -> AppResult<Entry> {
    let entry = compose_entry(draft, now)?;
    store.upsert_entry(&entry)?;
    info!(
        entry_id = %entry.id,
        lessons = entry.lessons().len(),
        mood = entry.mood.map(|m| m.as_str()).unwrap_or("none"),
        "Saved new entry"
    );
    Ok(entry)
}
