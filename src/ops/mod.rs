//! User-facing operations.
//!
//! Each operation takes the [`DiaryStore`](crate::journal_io::DiaryStore)
//! handle and, where time matters, an explicit `now`, and combines storage
//! with the pure derivations in [`journal_core`](crate::journal_core).

pub mod compose;
pub mod dashboard;
pub mod entries;
pub mod history;
pub mod lessons;
pub mod trends;

pub use compose::{compose_entry, save_new_entry, EntryDraft};
pub use dashboard::{build_dashboard, daily_prompt, Dashboard};
pub use entries::{remove_entry, show_entry};
pub use history::{search_history, sort_by_recency, History};
pub use lessons::{
    add_saved_lesson, lessons_feed, list_saved_lessons, remove_saved_lesson, SavedLesson,
};
pub use trends::{mood_trends, MoodTrends};
