//! Command-line interface.

pub mod render;

use crate::constants::{APP_DESCRIPTION, APP_NAME};
use crate::errors::AppResult;
use crate::journal_core::dates::parse_timestamp;
use crate::journal_core::Mood;
use crate::logging::LogFormat;
use crate::ops::EntryDraft;
use clap::{Args, Parser, Subcommand};

/// A personal growth journal: entries, lessons, streaks and mood trends
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print machine-readable JSON instead of text
    #[clap(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Format of log records written to stderr
    #[clap(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Default)]
pub enum Command {
    /// Write a new entry
    New(NewEntryArgs),
    /// Show one entry
    Show {
        /// Entry id
        id: String,
    },
    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
    },
    /// Streak, today's reflection prompt and the latest entries
    #[default]
    Dashboard,
    /// All entries, most recent first
    History {
        /// Only show entries whose content or lessons contain this text
        #[clap(short = 's', long, default_value = "")]
        search: String,
    },
    /// Every lesson recorded in any entry
    Lessons,
    /// Mood statistics
    Trends,
    /// Manage standalone saved lessons
    SavedLessons {
        #[clap(subcommand)]
        action: SavedLessonsCommand,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct NewEntryArgs {
    /// What happened and what you noticed
    pub content: String,

    /// How you felt: great, good, okay, struggling or difficult
    #[clap(short = 'm', long)]
    pub mood: Option<String>,

    /// A lesson learned (repeatable)
    #[clap(short = 'l', long = "lesson")]
    pub lessons: Vec<String>,

    /// Date the entry is about (YYYY-MM-DD, YYYYMMDD or RFC 3339); defaults to now
    #[clap(short = 'd', long)]
    pub date: Option<String>,
}

impl NewEntryArgs {
    /// Converts the raw arguments into a draft, parsing mood and date.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an unknown mood or unparseable date.
    pub fn to_draft(&self) -> AppResult<EntryDraft> {
        let mood = self
            .mood
            .as_deref()
            .map(str::parse::<Mood>)
            .transpose()?;
        let date = self.date.as_deref().map(parse_timestamp).transpose()?;

        Ok(EntryDraft {
            content: self.content.clone(),
            mood,
            lessons: self.lessons.clone(),
            date,
        })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SavedLessonsCommand {
    /// List saved lessons with their source entries
    List,
    /// Save a lesson
    Add {
        text: String,
        /// Id of the entry this lesson came from
        #[clap(short = 'e', long)]
        entry_id: Option<String>,
    },
    /// Delete a saved lesson
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(vec!["growth-diary"]);
        assert!(args.command.is_none());
        assert!(!args.json);
        assert!(!args.verbose);
        assert_eq!(args.log_format, LogFormat::Text);
        assert_eq!(args.command.unwrap_or_default(), Command::Dashboard);
    }

    #[test]
    fn test_new_with_all_options() {
        let args = CliArgs::parse_from(vec![
            "growth-diary",
            "new",
            "Went for a run",
            "-m",
            "good",
            "-l",
            "Start small",
            "--lesson",
            "Keep going",
            "--date",
            "2024-01-15",
        ]);

        match args.command {
            Some(Command::New(new)) => {
                assert_eq!(new.content, "Went for a run");
                assert_eq!(new.mood.as_deref(), Some("good"));
                assert_eq!(new.lessons, vec!["Start small", "Keep going"]);

                let draft = new.to_draft().unwrap();
                assert_eq!(draft.mood, Some(Mood::Good));
                assert_eq!(
                    draft.date,
                    Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
                );
            }
            other => panic!("Expected New command, got {:?}", other),
        }
    }

    #[test]
    fn test_to_draft_rejects_bad_mood_and_date() {
        let base = NewEntryArgs {
            content: "x".to_string(),
            mood: Some("ecstatic".to_string()),
            lessons: vec![],
            date: None,
        };
        assert!(matches!(base.to_draft(), Err(AppError::Validation(_))));

        let bad_date = NewEntryArgs {
            mood: None,
            date: Some("15/01/2024".to_string()),
            ..base
        };
        assert!(matches!(bad_date.to_draft(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(vec![
            "growth-diary",
            "history",
            "-s",
            "rain",
            "--json",
            "-v",
            "--log-format",
            "json",
        ]);
        assert!(args.json);
        assert!(args.verbose);
        assert_eq!(args.log_format, LogFormat::Json);
        assert_eq!(
            args.command,
            Some(Command::History {
                search: "rain".to_string()
            })
        );
    }

    #[test]
    fn test_saved_lessons_subcommands() {
        let args = CliArgs::parse_from(vec![
            "growth-diary",
            "saved-lessons",
            "add",
            "Ask early",
            "-e",
            "abc",
        ]);
        assert_eq!(
            args.command,
            Some(Command::SavedLessons {
                action: SavedLessonsCommand::Add {
                    text: "Ask early".to_string(),
                    entry_id: Some("abc".to_string()),
                }
            })
        );

        let args = CliArgs::parse_from(vec!["growth-diary", "saved-lessons", "list"]);
        assert_eq!(
            args.command,
            Some(Command::SavedLessons {
                action: SavedLessonsCommand::List
            })
        );
    }

    #[test]
    fn test_invalid_log_format_is_rejected() {
        let result = CliArgs::try_parse_from(vec!["growth-diary", "--log-format", "xml"]);
        assert!(result.is_err());
    }
}
