//! Journal records: entries, standalone lessons and moods.

use super::dates::timestamp;
use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the writer felt, from best to worst.
///
/// The declaration order is the canonical category order used wherever moods
/// are enumerated (selectors, distribution tie-breaks).
///
/// # Examples
///
/// ```
/// use growth_diary::journal_core::Mood;
///
/// let mood: Mood = "struggling".parse().unwrap();
/// assert_eq!(mood, Mood::Struggling);
/// assert_eq!(mood.scale(), 2);
/// assert_eq!(mood.label(), "Struggling");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Struggling,
    Difficult,
}

impl Mood {
    /// All moods in canonical order.
    pub const ALL: [Mood; 5] = [
        Mood::Great,
        Mood::Good,
        Mood::Okay,
        Mood::Struggling,
        Mood::Difficult,
    ];

    /// Numeric value on the 1-5 mood scale.
    pub fn scale(self) -> u8 {
        match self {
            Mood::Great => 5,
            Mood::Good => 4,
            Mood::Okay => 3,
            Mood::Struggling => 2,
            Mood::Difficult => 1,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Great => "Great",
            Mood::Good => "Good",
            Mood::Okay => "Okay",
            Mood::Struggling => "Struggling",
            Mood::Difficult => "Difficult",
        }
    }

    /// Theme color token used when charting this mood.
    pub fn color(self) -> &'static str {
        match self {
            Mood::Great => "growth-sage",
            Mood::Good => "primary",
            Mood::Okay => "growth-peach",
            Mood::Struggling => "growth-terracotta",
            Mood::Difficult => "destructive",
        }
    }

    /// Icon name shown next to the mood.
    pub fn icon(self) -> &'static str {
        match self {
            Mood::Great => "sparkles",
            Mood::Good => "smile",
            Mood::Okay => "meh",
            Mood::Struggling => "frown",
            Mood::Difficult => "cloud-rain",
        }
    }

    /// Persisted identifier, e.g. `"great"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Struggling => "struggling",
            Mood::Difficult => "difficult",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == wanted)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown mood '{}'. Expected one of: great, good, okay, struggling, difficult",
                    s
                ))
            })
    }
}

/// One dated journal record.
///
/// `date` is the moment the entry is about and drives chronological views;
/// `created_at` (milliseconds since the Unix epoch) is when it was written
/// and drives recency ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<String>>,
    pub created_at: i64,
}

impl Entry {
    /// The entry's lessons; empty when none were recorded.
    pub fn lessons(&self) -> &[String] {
        self.lessons.as_deref().unwrap_or(&[])
    }
}

/// A standalone lesson record, optionally pointing back at the entry it came from.
///
/// The referenced entry may no longer exist; readers treat that as an
/// unknown source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    pub created_at: i64,
}
