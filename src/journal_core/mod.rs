//! Core journal functionality without I/O operations.
//!
//! This module holds the data model (`Entry`, `Lesson`, `Mood`) and the
//! read-side derivations computed from it: the writing streak, search
//! filtering, the lessons feed and mood statistics. Every function here is a
//! pure function of its arguments; the current instant is always passed in
//! explicitly so results never depend on the wall clock.
//!
//! All day arithmetic is done on UTC instants.

pub mod dates;
pub mod entry;
pub mod lessons;
pub mod mood_stats;
pub mod search;
pub mod streak;

pub use entry::{Entry, Lesson, Mood};
pub use lessons::{aggregate_lessons, LessonItem};
pub use mood_stats::{compute_mood_stats, describe_average, MoodCount, MoodStats, TimelinePoint};
pub use search::{filter_entries, matches_query};
pub use streak::compute_streak;
