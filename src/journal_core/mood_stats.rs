//! Mood statistics: recent timeline, distribution, average and most common mood.

use super::dates::timestamp;
use super::entry::{Entry, Mood};
use crate::constants::{MOOD_TIMELINE_DAYS, TIMELINE_DATE_FORMAT};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// One point on the mood timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// Short display date, e.g. "Jan 5"
    pub display_date: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub date: DateTime<Utc>,
    pub mood: Mood,
    /// Value on the 1-5 mood scale
    pub value: u8,
    pub label: &'static str,
}

/// How many mood-bearing entries recorded a given mood.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
}

/// Everything the mood trends view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    /// Mood-bearing entries from the trailing window, oldest first
    pub timeline: Vec<TimelinePoint>,
    /// Non-zero counts over all mood-bearing entries, most frequent first
    pub distribution: Vec<MoodCount>,
    /// Mean scale value, 0 when no entry has a mood
    pub average: f64,
    pub most_common: Option<Mood>,
    /// Number of entries that recorded a mood
    pub tracked: usize,
}

/// Computes mood statistics as of `now`.
///
/// Only entries with a mood are considered. The timeline covers entries
/// dated strictly after `now` minus the timeline window; the distribution,
/// average and most common mood cover all of them. Distribution ties keep the
/// canonical mood order (great, good, okay, struggling, difficult).
///
/// # Examples
///
/// ```
/// use growth_diary::journal_core::{compute_mood_stats, Entry, Mood};
/// use growth_diary::journal_core::dates::parse_timestamp;
///
/// let entry = |id: &str, date: &str, mood: Mood| Entry {
///     id: id.to_string(),
///     date: parse_timestamp(date).unwrap(),
///     content: "...".to_string(),
///     mood: Some(mood),
///     lessons: None,
///     created_at: 0,
/// };
/// let entries = vec![
///     entry("1", "2024-01-01", Mood::Great),
///     entry("2", "2024-01-02", Mood::Difficult),
/// ];
///
/// let stats = compute_mood_stats(&entries, parse_timestamp("2024-01-10").unwrap());
/// assert_eq!(stats.average, 3.0);
/// assert_eq!(stats.most_common, Some(Mood::Great));
/// assert_eq!(stats.distribution.len(), 2);
/// ```
pub fn compute_mood_stats(entries: &[Entry], now: DateTime<Utc>) -> MoodStats {
    let with_mood: Vec<(&Entry, Mood)> = entries
        .iter()
        .filter_map(|entry| entry.mood.map(|mood| (entry, mood)))
        .collect();

    let window_start = now - Duration::days(MOOD_TIMELINE_DAYS);
    let mut recent: Vec<&(&Entry, Mood)> = with_mood
        .iter()
        .filter(|(entry, _)| entry.date > window_start)
        .collect();
    recent.sort_by_key(|(entry, _)| entry.date);

    let timeline = recent
        .into_iter()
        .map(|(entry, mood)| TimelinePoint {
            display_date: entry.date.format(TIMELINE_DATE_FORMAT).to_string(),
            date: entry.date,
            mood: *mood,
            value: mood.scale(),
            label: mood.label(),
        })
        .collect();

    let mut counts = vec![0usize; Mood::ALL.len()];
    for (_, mood) in &with_mood {
        if let Some(slot) = Mood::ALL.iter().position(|m| m == mood) {
            counts[slot] += 1;
        }
    }

    let mut distribution: Vec<MoodCount> = Mood::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(mood, count)| MoodCount {
            mood: *mood,
            label: mood.label(),
            color: mood.color(),
            count,
        })
        .collect();
    // Stable, so equal counts stay in canonical order
    distribution.sort_by(|a, b| b.count.cmp(&a.count));

    let average = if with_mood.is_empty() {
        0.0
    } else {
        let sum: u32 = with_mood.iter().map(|(_, mood)| u32::from(mood.scale())).sum();
        f64::from(sum) / with_mood.len() as f64
    };

    MoodStats {
        timeline,
        most_common: distribution.first().map(|count| count.mood),
        distribution,
        average,
        tracked: with_mood.len(),
    }
}

/// Describes an average mood in words.
///
/// # Examples
///
/// ```
/// use growth_diary::journal_core::describe_average;
///
/// assert_eq!(describe_average(4.5), "Thriving");
/// assert_eq!(describe_average(3.0), "Finding your way");
/// assert_eq!(describe_average(0.0), "Going through difficulty");
/// ```
pub fn describe_average(average: f64) -> &'static str {
    if average >= 4.5 {
        "Thriving"
    } else if average >= 3.5 {
        "Growing steadily"
    } else if average >= 2.5 {
        "Finding your way"
    } else if average >= 1.5 {
        "Facing challenges"
    } else {
        "Going through difficulty"
    }
}
