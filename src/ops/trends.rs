//! Mood trends over the stored entries.

use crate::errors::AppResult;
use crate::journal_core::{compute_mood_stats, describe_average, MoodStats};
use crate::journal_io::DiaryStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTrends {
    #[serde(flatten)]
    pub stats: MoodStats,
    /// Wording for the average, absent when no mood was recorded
    pub summary: Option<&'static str>,
}

pub fn mood_trends(store: &DiaryStore, now: DateTime<Utc>) -> AppResult<MoodTrends> {
    let stats = compute_mood_stats(&store.list_entries()?, now);
    let summary = (stats.tracked > 0).then(|| describe_average(stats.average));
    info!(
        tracked = stats.tracked,
        timeline = stats.timeline.len(),
        "Computed mood trends"
    );
    Ok(MoodTrends { stats, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::{Entry, Mood};
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_trends_summary() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let store = DiaryStore::in_memory();
        assert_eq!(mood_trends(&store, now).unwrap().summary, None);

        for (id, mood) in [("a", Mood::Great), ("b", Mood::Good)] {
            store
                .upsert_entry(&Entry {
                    id: id.to_string(),
                    date: now - Duration::days(1),
                    content: "c".to_string(),
                    mood: Some(mood),
                    lessons: None,
                    created_at: 0,
                })
                .unwrap();
        }

        let trends = mood_trends(&store, now).unwrap();
        assert_eq!(trends.stats.average, 4.5);
        assert_eq!(trends.summary, Some("Thriving"));
        assert_eq!(trends.stats.timeline.len(), 2);

        let json = serde_json::to_value(&trends).unwrap();
        assert_eq!(json["summary"], "Thriving");
        assert_eq!(json["mostCommon"], "great");
    }
}
