/*!
 * Error types for the subsmerge application.
 *
 * `MergeError` names every way a merge run can fail. Most of them are absorbed
 * where they happen (a missing folder yields no entries, an unreadable
 * subtitle yields no text); only `EmptyResult` and `WriteFailure` end a run.
 */

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while listing, cleaning, merging or writing
#[derive(Error, Debug)]
pub enum MergeError {
    /// A directory did not exist when its listing was attempted
    #[error("Directory '{}' not found", path.display())]
    MissingDirectory {
        /// The directory that was requested
        path: PathBuf,
    },

    /// Any other failure while enumerating a directory
    #[error("Unexpected error while listing '{}' - {source}", path.display())]
    ListingFailure {
        /// The directory being listed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A subtitle file could not be opened or decoded as UTF-8
    #[error("Failed to clean subtitle file '{}' - {source}", path.display())]
    FileReadFailure {
        /// The subtitle file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The merged document could not be written
    #[error("Failed to write output file '{}' - {source}", path.display())]
    WriteFailure {
        /// The output file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Nothing was produced at all
    #[error("No content to write. Check base folder '{}'", base_folder.display())]
    EmptyResult {
        /// The configured course root
        base_folder: PathBuf,
    },
}

impl MergeError {
    /// Whether this error ends the run rather than being skipped over
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::EmptyResult { .. } | Self::WriteFailure { .. })
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the merge pipeline
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
