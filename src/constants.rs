//! Constants used throughout the application.
//!
//! This module contains all constants used in the growth-diary application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "growth-diary";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str =
    "A personal growth journal: dated entries, moods, and lessons learned";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the data directory.
pub const ENV_VAR_DIARY_DIR: &str = "GROWTH_DIARY_DIR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for diary data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".growth-diary";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Storage Layout
/// Key of the persisted entry collection.
pub const ENTRIES_KEY: &str = "growth_diary_entries";
/// Key of the persisted standalone lesson collection.
pub const LESSONS_KEY: &str = "growth_diary_lessons";
/// Appended to a key, followed by `-<n>`, when unparseable data is set aside.
pub const CORRUPT_KEY_SUFFIX: &str = ".corrupt";
/// File extension for persisted collections.
pub const COLLECTION_FILE_EXTENSION: &str = "json";
/// File extension for per-collection lock files.
pub const LOCK_FILE_EXTENSION: &str = "lock";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Locking
/// How many times a busy collection lock is retried before giving up.
pub const LOCK_RETRY_ATTEMPTS: u32 = 20;
/// Delay between lock attempts, in milliseconds.
pub const LOCK_RETRY_DELAY_MS: u64 = 50;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Short date used on the mood timeline, e.g. "Jan 5".
pub const TIMELINE_DATE_FORMAT: &str = "%b %-d";
/// Long date used when listing entries, e.g. "Monday, January 1, 2024".
pub const ENTRY_DATE_FORMAT: &str = "%A, %B %-d, %Y";
/// Date used on the lessons feed, e.g. "January 1, 2024".
pub const LESSON_DATE_FORMAT: &str = "%B %-d, %Y";
/// Length of the trailing mood timeline window, in days.
pub const MOOD_TIMELINE_DAYS: i64 = 30;

// Views
/// Number of entries shown on the dashboard.
pub const RECENT_ENTRY_LIMIT: usize = 3;
/// Daily reflection prompts, indexed by weekday (Sunday first) modulo length.
pub const REFLECTION_PROMPTS: &[&str] = &[
    "What small win can you celebrate today?",
    "What challenged you, and what did it teach you?",
    "How did you show up for yourself today?",
    "What are you grateful for right now?",
    "What would future you thank you for doing today?",
];

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "growth-diary";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
