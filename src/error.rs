//! # Error Handling
//!
//! This module defines the centralized error type for `clone-repos`. It uses
//! `thiserror` to build a single `Error` enum covering every failure mode of a
//! batch clone, with enough context in each variant to produce a one-line,
//! human-readable log message.
//!
//! The variants fall into three severities, decided by the caller rather than
//! by the code that raises them:
//!
//! - **Fatal before any work**: `Config`, `InputFile`, `Credentials`.
//! - **Per-entry, skipped**: `MalformedUrl`, `Probe`.
//! - **Per-entry, failed**: `GitClone`, `GitCommand`.
//!
//! `Io` and `UrlParse` wrap lower-level errors and inherit the severity of the
//! operation that produced them.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for clone-repos operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required option is missing or options contradict each other.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The repository list file could not be read.
    #[error("Error opening {}: {source}", path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No local directory name can be derived from the URL.
    #[error("Malformed repository URL '{url}': {message}")]
    MalformedUrl { url: String, message: String },

    /// The clone target exists but cannot be used as-is.
    #[error("Cannot use {}: {message}", path.display())]
    Probe { path: PathBuf, message: String },

    /// An error occurred while cloning a Git repository.
    ///
    /// Includes an optional hint for resolution, typically for authentication
    /// problems.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!(" (hint: {})", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        hint: Option<String>,
    },

    /// A Git command run against a local repository failed.
    #[error("Git command failed in {}: {command} - {stderr}", path.display())]
    GitCommand {
        command: String,
        path: PathBuf,
        stderr: String,
    },

    /// Credentials could not be attached to a URL.
    #[error("Cannot apply credentials to {url}: {message}")]
    Credentials { url: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
