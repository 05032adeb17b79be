//! Error handling utilities for the growth-diary application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur when attempting to lock a persisted collection.
///
/// Every mutation of a collection holds an exclusive lock for the whole
/// read-modify-write, so a second writer can never overwrite the first one's
/// update without seeing it.
///
/// # Examples
///
/// Creating a file busy error:
///
/// ```
/// use growth_diary::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/path/to/growth_diary_entries.lock"),
/// };
///
/// assert!(format!("{}", error).contains("being written"));
/// ```
///
/// Creating an acquisition failed error:
///
/// ```
/// use growth_diary::errors::LockError;
/// use std::path::PathBuf;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::PermissionDenied, "permission denied");
/// let error = LockError::AcquisitionFailed {
///     path: PathBuf::from("/path/to/growth_diary_entries.lock"),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("Failed to acquire lock"));
/// assert!(format!("{}", error).contains("permission denied"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the collection is locked by another process for longer than we are willing to wait.
    #[error("Diary data is currently being written by another process: {path}. Please retry once the other growth-diary process has finished.")]
    FileBusy {
        /// The path to the lock file that is held
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire lock {path}: {source}. Please check file permissions and ensure the data directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file that couldn't be locked
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents failures while persisting a collection to the key-value backend.
///
/// # Examples
///
/// ```
/// use growth_diary::errors::StorageError;
///
/// let error = StorageError::InvalidKey("../escape".to_string());
/// assert!(format!("{}", error).contains("../escape"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// A collection could not be encoded as JSON.
    #[error("Failed to encode collection '{key}': {source}")]
    Encode {
        /// Storage key of the collection
        key: String,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Writing the encoded collection to durable storage failed.
    #[error("Failed to write collection '{key}': {source}. The previous contents were left unchanged.")]
    Write {
        /// Storage key of the collection
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The key cannot be mapped onto the backend (empty, or containing path separators).
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),
}

/// Represents all possible errors that can occur in the growth-diary application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use growth_diary::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use growth_diary::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input rejected before it reached the store (e.g. an empty entry).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Errors in journal logic (e.g. a requested entry does not exist).
    #[error("Journal error: {0}")]
    Journal(String),

    /// Errors related to collection locking.
    ///
    /// This variant uses a dedicated LockError type to provide detailed
    /// information about what went wrong with locking.
    #[error("Locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors persisting a collection.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// This type alias is used throughout the application to represent operations
/// that may fail with an `AppError`.
///
/// # Examples
///
/// ```
/// use growth_diary::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     // Operation that could fail
///     if false {
///         return Err(AppError::Validation("Entry is empty".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
