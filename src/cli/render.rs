//! Plain-text rendering of command results.

use crate::constants::{ENTRY_DATE_FORMAT, LESSON_DATE_FORMAT};
use crate::journal_core::{describe_average, Entry, LessonItem};
use crate::ops::{Dashboard, History, MoodTrends, SavedLesson};
use std::fmt::{self, Write};

const PREVIEW_CHARS: usize = 80;

fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or_default();
    if first_line.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some() {
        let cut: String = first_line.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut.trim_end())
    } else {
        first_line.to_string()
    }
}

fn entry_summary(out: &mut String, entry: &Entry) -> fmt::Result {
    let mood = entry
        .mood
        .map(|m| format!(" [{}]", m.label()))
        .unwrap_or_default();
    writeln!(out, "{}{}  ({})", entry.date.format(ENTRY_DATE_FORMAT), mood, entry.id)?;
    writeln!(out, "  {}", preview(&entry.content))?;
    let lessons = entry.lessons().len();
    if lessons > 0 {
        writeln!(out, "  {} lesson{}", lessons, plural(lessons))?;
    }
    Ok(())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Runs `build` against an empty buffer and returns the text without trailing blank lines.
fn render(build: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // Formatting into a String only fails if a Display impl does
    if build(&mut out).is_err() {
        out.push_str("<formatting error>");
    }
    out.trim_end().to_string()
}

pub fn dashboard(dashboard: &Dashboard) -> String {
    render(|out| {
        let streak = dashboard.streak;
        writeln!(out, "Current streak: {} day{}", streak, plural(streak))?;
        writeln!(out, "Today's reflection: {}\n", dashboard.prompt)?;

        if dashboard.recent.is_empty() {
            writeln!(out, "No entries yet. Write your first one with `growth-diary new`.")?;
        } else {
            writeln!(out, "Recent entries:")?;
            for entry in &dashboard.recent {
                entry_summary(out, entry)?;
            }
        }
        Ok(())
    })
}

pub fn entry(entry: &Entry) -> String {
    render(|out| {
        writeln!(out, "{}", entry.date.format(ENTRY_DATE_FORMAT))?;
        if let Some(mood) = entry.mood {
            writeln!(out, "Mood: {}", mood.label())?;
        }
        writeln!(out, "\n{}", entry.content)?;

        if !entry.lessons().is_empty() {
            writeln!(out, "\nLessons learned:")?;
            for lesson in entry.lessons() {
                writeln!(out, "  - {}", lesson)?;
            }
        }
        writeln!(out, "\nid: {}", entry.id)
    })
}

pub fn history(history: &History) -> String {
    render(|out| {
        if history.query.is_empty() {
            writeln!(out, "{} entries", history.total)?;
        } else {
            writeln!(
                out,
                "{} of {} entries match \"{}\"",
                history.entries.len(),
                history.total,
                history.query
            )?;
        }
        for entry in &history.entries {
            writeln!(out)?;
            entry_summary(out, entry)?;
        }
        Ok(())
    })
}

pub fn lessons_feed(items: &[LessonItem]) -> String {
    if items.is_empty() {
        return "No lessons yet. Add some with `growth-diary new --lesson`.".to_string();
    }
    render(|out| {
        for item in items {
            writeln!(
                out,
                "- {}  (from {})",
                item.lesson_text,
                item.entry_date.format(LESSON_DATE_FORMAT)
            )?;
        }
        Ok(())
    })
}

pub fn saved_lessons(lessons: &[SavedLesson]) -> String {
    if lessons.is_empty() {
        return "No saved lessons.".to_string();
    }
    render(|out| {
        for saved in lessons {
            writeln!(
                out,
                "- {}  ({}; id {})",
                saved.lesson.content,
                saved.source_label(),
                saved.lesson.id
            )?;
        }
        Ok(())
    })
}

pub fn trends(trends: &MoodTrends) -> String {
    let stats = &trends.stats;
    if stats.tracked == 0 {
        return "No moods recorded yet. Add one with `growth-diary new --mood`.".to_string();
    }

    render(|out| {
        writeln!(
            out,
            "Average mood: {:.1} ({})",
            stats.average,
            trends.summary.unwrap_or_else(|| describe_average(stats.average))
        )?;
        if let Some(mood) = stats.most_common {
            writeln!(out, "Most common: {}", mood.label())?;
        }
        writeln!(out, "Tracked days: {}", stats.tracked)?;

        writeln!(out, "\nLast 30 days:")?;
        if stats.timeline.is_empty() {
            writeln!(out, "  no moods recorded")?;
        }
        for point in &stats.timeline {
            writeln!(
                out,
                "  {:<7} {:<5} {}",
                point.display_date,
                "#".repeat(usize::from(point.value)),
                point.label
            )?;
        }

        writeln!(out, "\nDistribution:")?;
        for count in &stats.distribution {
            writeln!(out, "  {:<11} {}", count.label, count.count)?;
        }
        Ok(())
    })
}
