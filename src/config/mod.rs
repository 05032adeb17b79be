//! Configuration management for growth-diary.
//!
//! Settings come from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `GROWTH_DIARY_DIR`: Directory holding the diary collections (defaults to ~/.growth-diary)
//! - `HOME`: Used for building the default data directory path

use crate::constants::{DEFAULT_DATA_SUBDIR, ENV_VAR_DIARY_DIR, ENV_VAR_HOME, REDACTED_PLACEHOLDER};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for growth-diary.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use growth_diary::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/diary"),
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from the environment:
/// ```no_run
/// use growth_diary::Config;
///
/// std::env::set_var("GROWTH_DIARY_DIR", "/custom/diary/path");
/// let config = Config::load().expect("Failed to load configuration");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory where the entry and lesson collections are stored.
    ///
    /// Loaded from `GROWTH_DIARY_DIR`, falling back to `~/.growth-diary`.
    pub data_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// The data directory path is expanded with `shellexpand`, so `~` and
    /// `$VAR` references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if path expansion fails or the expanded path
    /// is empty.
    pub fn load() -> AppResult<Self> {
        let data_dir_raw = env::var(ENV_VAR_DIARY_DIR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| {
                let home = env::var(ENV_VAR_HOME).unwrap_or_default();
                format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
            });

        let expanded = shellexpand::full(&data_dir_raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let data_dir = PathBuf::from(expanded.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        Ok(Config { data_dir })
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the data directory is empty or relative.
    ///
    /// # Examples
    ///
    /// ```
    /// use growth_diary::Config;
    /// use std::path::PathBuf;
    ///
    /// let relative = Config { data_dir: PathBuf::from("diary") };
    /// assert!(relative.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_io;
    use serial_test::serial;
    use tempfile::tempdir;

    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn new(keys: &[&'static str]) -> Self {
            let saved = keys.iter().map(|k| (*k, env::var(k).ok())).collect();
            EnvGuard { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn test_debug_impl_redacts_path() {
        let config = Config {
            data_dir: PathBuf::from("/home/username/private/diary"),
        };

        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("/home/username/private/diary"));
    }

    #[test]
    #[serial]
    fn test_load_with_custom_dir() {
        let _guard = EnvGuard::new(&[ENV_VAR_DIARY_DIR]);
        let temp_dir = tempdir().unwrap();
        env::set_var(ENV_VAR_DIARY_DIR, temp_dir.path());

        let config = Config::load().unwrap();
        assert_eq!(config.data_dir, temp_dir.path());
    }

    #[test]
    #[serial]
    fn test_load_defaults_to_home_subdir() {
        let _guard = EnvGuard::new(&[ENV_VAR_DIARY_DIR, ENV_VAR_HOME]);
        env::remove_var(ENV_VAR_DIARY_DIR);
        env::set_var(ENV_VAR_HOME, "/home/tester");

        let config = Config::load().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/home/tester/.growth-diary"));
    }

    #[test]
    #[serial]
    fn test_load_expands_variables() {
        let _guard = EnvGuard::new(&[ENV_VAR_DIARY_DIR, ENV_VAR_HOME]);
        env::set_var(ENV_VAR_HOME, "/home/tester");
        env::set_var(ENV_VAR_DIARY_DIR, "$HOME/notes/diary");

        let config = Config::load().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/home/tester/notes/diary"));
    }

    #[test]
    #[serial]
    fn test_load_fails_on_undefined_variable() {
        let _guard = EnvGuard::new(&[ENV_VAR_DIARY_DIR]);
        env::set_var(ENV_VAR_DIARY_DIR, "$GROWTH_DIARY_SURELY_UNDEFINED_VAR/diary");

        match Config::load() {
            Err(AppError::Config(msg)) => assert!(msg.contains("Failed to expand path")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_empty_and_relative_dirs() {
        let empty = Config {
            data_dir: PathBuf::new(),
        };
        match empty.validate() {
            Err(AppError::Config(msg)) => assert_eq!(msg, "Data directory path is empty"),
            other => panic!("Expected Config error, got {:?}", other),
        }

        let relative = Config {
            data_dir: PathBuf::from("relative/diary"),
        };
        match relative.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("absolute")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validated_dir_can_be_created() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            data_dir: temp_dir.path().join("diary"),
        };
        config.validate().unwrap();

        journal_io::ensure_data_directory_exists(&config.data_dir).unwrap();
        assert!(config.data_dir.is_dir());
    }
}
