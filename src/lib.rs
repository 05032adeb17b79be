/*!
# growth-diary

A personal growth journal. Entries are dated reflections with an optional
mood and a list of lessons learned; standalone lessons can also be saved on
their own. From the stored entries the crate derives a writing streak, a
searchable history, a lessons feed and mood statistics.

## Architecture

- `journal_core`: records (`Entry`, `Lesson`, `Mood`) and the pure derivations
  (streak, search, lesson aggregation, mood statistics)
- `journal_io`: persistence over a key-value store, one JSON collection per key
- `ops`: user-facing operations combining storage with derivations
- `cli`: command-line parsing and text rendering
- `config`: configuration loading and validation
- `logging`: tracing subscriber setup
- `errors`: error types

## Usage Example

```rust
use chrono::Utc;
use growth_diary::journal_io::DiaryStore;
use growth_diary::ops::{self, EntryDraft};

fn main() -> growth_diary::AppResult<()> {
    let store = DiaryStore::in_memory();
    let now = Utc::now();

    ops::save_new_entry(
        &store,
        EntryDraft {
            content: "Finished the first draft".to_string(),
            lessons: vec!["Done beats perfect".to_string()],
            ..Default::default()
        },
        now,
    )?;

    let dashboard = ops::build_dashboard(&store, now)?;
    assert_eq!(dashboard.streak, 1);
    assert_eq!(ops::lessons_feed(&store)?.len(), 1);
    Ok(())
}
```
*/

/// Command-line interface for parsing and rendering
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Records and pure derivations
pub mod journal_core;
/// Persistence
pub mod journal_io;
/// Tracing subscriber setup
pub mod logging;
/// User-facing operations
pub mod ops;

pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{Entry, Lesson, Mood};
pub use journal_io::DiaryStore;
