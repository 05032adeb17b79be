/*!
# growth-diary

Command-line front end for the growth diary: write dated entries with an
optional mood and lessons learned, then review your streak, history, lessons
and mood trends.

## Usage

```text
growth-diary [OPTIONS] [COMMAND]

Commands:
  new            Write a new entry
  show           Show one entry
  delete         Delete an entry
  dashboard      Streak, today's reflection prompt and the latest entries (default)
  history        All entries, most recent first
  lessons        Every lesson recorded in any entry
  trends         Mood statistics
  saved-lessons  Manage standalone saved lessons

Options:
      --json                     Print machine-readable JSON instead of text
  -v, --verbose                  Enable debug logging
      --log-format <LOG_FORMAT>  Format of log records written to stderr [default: text]
```

## Configuration

- `GROWTH_DIARY_DIR`: where the diary is stored (defaults to `~/.growth-diary`)
- `RUST_LOG`: log filter when `--verbose` is not given (defaults to `info`)
*/

use chrono::{DateTime, Utc};
use clap::Parser;
use growth_diary::cli::{render, CliArgs, Command, SavedLessonsCommand};
use growth_diary::config::Config;
use growth_diary::constants::{TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME};
use growth_diary::errors::{AppError, AppResult};
use growth_diary::journal_io::DiaryStore;
use growth_diary::logging::init_logging;
use growth_diary::ops;
use serde::Serialize;
use std::process;
use tracing::{debug, error, info, info_span};
use uuid::Uuid;

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = init_logging(args.log_format, args.verbose) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    // Every command sees the same instant
    let now = Utc::now();

    if let Err(e) = run(args, now) {
        // The only place errors are logged
        error!("Application error: {:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs, now: DateTime<Utc>) -> AppResult<()> {
    info!("Starting growth-diary");
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    let store = DiaryStore::open(&config.data_dir)?;
    let json = args.json;

    match args.command.unwrap_or_default() {
        Command::New(new) => {
            let entry = ops::save_new_entry(&store, new.to_draft()?, now)?;
            emit(&entry, json, |entry| entry.id.clone())
        }
        Command::Show { id } => {
            let entry = ops::show_entry(&store, &id)?
                .ok_or_else(|| AppError::Journal(format!("Entry not found: {}", id)))?;
            emit(&entry, json, render::entry)
        }
        Command::Delete { id } => {
            let removed = ops::remove_entry(&store, &id)?;
            emit(&Removal { id, removed }, json, |r| r.describe("entry"))
        }
        Command::Dashboard => {
            let dashboard = ops::build_dashboard(&store, now)?;
            emit(&dashboard, json, render::dashboard)
        }
        Command::History { search } => {
            let history = ops::search_history(&store, &search)?;
            emit(&history, json, render::history)
        }
        Command::Lessons => {
            let items = ops::lessons_feed(&store)?;
            emit(&items, json, |items| render::lessons_feed(items))
        }
        Command::Trends => {
            let trends = ops::mood_trends(&store, now)?;
            emit(&trends, json, render::trends)
        }
        Command::SavedLessons { action } => match action {
            SavedLessonsCommand::List => {
                let lessons = ops::list_saved_lessons(&store)?;
                emit(&lessons, json, |lessons| render::saved_lessons(lessons))
            }
            SavedLessonsCommand::Add { text, entry_id } => {
                let lesson = ops::add_saved_lesson(&store, &text, entry_id, now)?;
                emit(&lesson, json, |lesson| lesson.id.clone())
            }
            SavedLessonsCommand::Delete { id } => {
                let removed = ops::remove_saved_lesson(&store, &id)?;
                emit(&Removal { id, removed }, json, |r| r.describe("lesson"))
            }
        },
    }
}

#[derive(Serialize)]
struct Removal {
    id: String,
    removed: bool,
}

impl Removal {
    fn describe(&self, kind: &str) -> String {
        if self.removed {
            format!("Deleted {} {}", kind, self.id)
        } else {
            format!("No {} with id {}", kind, self.id)
        }
    }
}

/// Prints `value` as pretty JSON, or as text produced by `text`.
fn emit<T: Serialize>(value: &T, json: bool, text: impl FnOnce(&T) -> String) -> AppResult<()> {
    if json {
        let encoded = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::Journal(format!("Failed to encode output: {}", e)))?;
        println!("{}", encoded);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}
