//! The dashboard: current streak, today's reflection prompt and the latest entries.

use super::history::sort_by_recency;
use crate::constants::{RECENT_ENTRY_LIMIT, REFLECTION_PROMPTS};
use crate::errors::AppResult;
use crate::journal_core::dates::weekday_from_sunday;
use crate::journal_core::{compute_streak, Entry};
use crate::journal_io::DiaryStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub streak: usize,
    pub prompt: &'static str,
    /// At most three entries, most recently written first
    pub recent: Vec<Entry>,
}

/// The reflection prompt for the day of `now`.
///
/// Prompts rotate by day of week counted from Sunday, so Sunday and Friday
/// share the first prompt and Saturday and Monday the second.
///
/// # Examples
///
/// ```
/// use growth_diary::ops::daily_prompt;
/// use chrono::{TimeZone, Utc};
///
/// // 2024-03-10 is a Sunday
/// let sunday = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
/// assert_eq!(daily_prompt(sunday), "What small win can you celebrate today?");
/// ```
pub fn daily_prompt(now: DateTime<Utc>) -> &'static str {
    let index = weekday_from_sunday(now) as usize % REFLECTION_PROMPTS.len();
    REFLECTION_PROMPTS[index]
}

pub fn build_dashboard(store: &DiaryStore, now: DateTime<Utc>) -> AppResult<Dashboard> {
    let mut entries = store.list_entries()?;
    let streak = compute_streak(&entries, now);

    sort_by_recency(&mut entries);
    entries.truncate(RECENT_ENTRY_LIMIT);

    info!(streak, recent = entries.len(), "Built dashboard");
    Ok(Dashboard {
        streak,
        prompt: daily_prompt(now),
        recent: entries,
    })
}
