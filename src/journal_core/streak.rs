//! Consecutive-day writing streak.

use super::dates::whole_days_between;
use super::entry::Entry;
use chrono::{DateTime, Utc};

/// Counts the current writing streak as of `now`.
///
/// Entry dates are sorted newest first and walked in order: the i-th entry
/// extends the streak only if it is exactly `i` whole days old. The walk
/// stops at the first entry that does not match.
///
/// Entries are not deduplicated per day, so a second entry on the same day
/// ends the walk. Two entries written today give a streak of 1.
///
/// # Examples
///
/// ```
/// use growth_diary::journal_core::{compute_streak, Entry};
/// use chrono::{Duration, TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
/// let entry = |days_ago: i64| Entry {
///     id: days_ago.to_string(),
///     date: now - Duration::days(days_ago),
///     content: "wrote".to_string(),
///     mood: None,
///     lessons: None,
///     created_at: 0,
/// };
///
/// assert_eq!(compute_streak(&[entry(0), entry(1), entry(2)], now), 3);
/// assert_eq!(compute_streak(&[entry(0), entry(2)], now), 1);
/// assert_eq!(compute_streak(&[], now), 0);
/// ```
pub fn compute_streak(entries: &[Entry], now: DateTime<Utc>) -> usize {
    let mut dates: Vec<DateTime<Utc>> = entries.iter().map(|entry| entry.date).collect();
    dates.sort_by(|a, b| b.cmp(a));

    dates
        .iter()
        .enumerate()
        .take_while(|(offset, date)| whole_days_between(now, **date) == *offset as i64)
        .count()
}
