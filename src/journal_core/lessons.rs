//! The lessons feed: every lesson embedded in every entry, newest first.

use super::dates::timestamp;
use super::entry::Entry;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One lesson from the feed together with the entry it was written in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonItem {
    pub lesson_text: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub entry_date: DateTime<Utc>,
    pub entry_id: String,
}

/// Flattens the lessons of all entries into one feed ordered by entry date, newest first.
///
/// Entries without lessons contribute nothing. The sort is stable: entries
/// sharing a date keep their input order, and lessons keep their order
/// within an entry.
pub fn aggregate_lessons(entries: &[Entry]) -> Vec<LessonItem> {
    let mut items: Vec<LessonItem> = entries
        .iter()
        .flat_map(|entry| {
            entry.lessons().iter().map(move |lesson| LessonItem {
                lesson_text: lesson.clone(),
                entry_date: entry.date,
                entry_id: entry.id.clone(),
            })
        })
        .collect();

    items.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
    items
}
