//! Lessons: the feed derived from entries, and the standalone saved-lesson collection.

use crate::constants::LESSON_DATE_FORMAT;
use crate::errors::{AppError, AppResult};
use crate::journal_core::{aggregate_lessons, Entry, Lesson, LessonItem};
use crate::journal_io::DiaryStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// Every lesson written into any entry, newest entry first.
pub fn lessons_feed(store: &DiaryStore) -> AppResult<Vec<LessonItem>> {
    let items = aggregate_lessons(&store.list_entries()?);
    info!(count = items.len(), "Aggregated lessons");
    Ok(items)
}

/// A saved lesson together with the entry it points at, when that entry still exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedLesson {
    pub lesson: Lesson,
    pub source: Option<Entry>,
}

impl SavedLesson {
    /// Human-readable origin: the source entry's date, or "unknown source".
    pub fn source_label(&self) -> String {
        match &self.source {
            Some(entry) => format!("from {}", entry.date.format(LESSON_DATE_FORMAT)),
            None => "unknown source".to_string(),
        }
    }
}

/// Saves a standalone lesson, optionally referencing an entry.
///
/// The reference is not checked; it may point at an entry that is later
/// deleted or never existed.
///
/// # Errors
///
/// Returns `AppError::Validation` if the text is empty after trimming.
pub fn add_saved_lesson(
    store: &DiaryStore,
    text: &str,
    entry_id: Option<String>,
    now: DateTime<Utc>,
) -> AppResult<Lesson> {
    let content = text.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Lesson cannot be empty".to_string()));
    }

    let lesson = Lesson {
        id: Uuid::new_v4().to_string(),
        content: content.to_string(),
        entry_id: entry_id.filter(|id| !id.trim().is_empty()),
        created_at: now.timestamp_millis(),
    };
    store.upsert_lesson(&lesson)?;
    info!(lesson_id = %lesson.id, "Saved lesson");
    Ok(lesson)
}

/// Saved lessons, newest first, each resolved against the stored entries.
pub fn list_saved_lessons(store: &DiaryStore) -> AppResult<Vec<SavedLesson>> {
    let entries: HashMap<String, Entry> = store
        .list_entries()?
        .into_iter()
        .map(|entry| (entry.id.clone(), entry))
        .collect();

    let mut lessons = store.list_lessons()?;
    lessons.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(lessons
        .into_iter()
        .map(|lesson| {
            let source = lesson
                .entry_id
                .as_ref()
                .and_then(|id| entries.get(id))
                .cloned();
            SavedLesson { lesson, source }
        })
        .collect())
}

pub fn remove_saved_lesson(store: &DiaryStore, id: &str) -> AppResult<bool> {
    let removed = store.delete_lesson(id)?;
    info!(lesson_id = id, removed, "Deleted saved lesson");
    Ok(removed)
}
