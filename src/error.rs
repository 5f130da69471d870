//! Error types for ADIF loading, configuration and Cabrillo rendering.
//!
//! The ADIF decoder itself never fails: malformed tags are skipped and
//! non-numeric values stay strings. Errors only arise at the boundaries around
//! it.
//!
//! ## Error Categories
//!
//! - **Input**: the ADIF or configuration file could not be read
//! - **Empty result**: parsing produced no QSO records to convert
//! - **Configuration**: invalid TOML or missing templates
//! - **Rendering**: template failures, missing or malformed QSO timestamps
//! - **I/O**: writing the Cabrillo output failed
//!
//! ## Examples
//!
//! ```rust
//! use adif2cabrillo::Error;
//!
//! let err = Error::input_unavailable("contest.adi", "No such file or directory");
//! assert!(err.to_string().contains("contest.adi"));
//! ```

use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Represents all possible errors raised around the ADIF decoder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Source text could not be obtained (missing or unreadable file)
    #[error("Cannot read {path}: {reason}")]
    InputUnavailable { path: String, reason: String },

    /// Parsing succeeded but produced zero QSO records
    #[error("No contacts to process")]
    EmptyResult,

    /// Configuration file is not valid TOML or has unexpected types
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// One or more of the required templates is absent
    #[error("Missing templates in the configuration file: {}", .0.join(", "))]
    MissingTemplates(Vec<String>),

    /// A QSO record lacks a field the renderer depends on
    #[error("QSO record has no {0} field")]
    MissingField(String),

    /// `QSO_DATE` and `TIME_ON` do not form a valid timestamp
    #[error("Invalid QSO timestamp: date {date:?}, time {time:?}")]
    InvalidTimestamp { date: String, time: String },

    /// Template compilation or rendering failure
    #[error("Template error: {0}")]
    Template(String),

    /// IO error while writing output
    #[error("IO error: {message}")]
    Io { kind: io::ErrorKind, message: String },
}

impl Error {
    /// Creates an input-unavailable error for the given path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adif2cabrillo::Error;
    ///
    /// let err = Error::input_unavailable("log.adi", "permission denied");
    /// assert_eq!(err.to_string(), "Cannot read log.adi: permission denied");
    /// ```
    pub fn input_unavailable<P: AsRef<Path>, T: fmt::Display>(path: P, reason: T) -> Self {
        Error::InputUnavailable {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a missing-field error for a QSO record.
    pub fn missing_field(name: &str) -> Self {
        Error::MissingField(name.to_string())
    }

    /// Creates an invalid-timestamp error from the offending field values.
    pub fn invalid_timestamp(date: &str, time: &str) -> Self {
        Error::InvalidTimestamp {
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    /// Returns `true` for the errors caused by unusable input rather than a
    /// broken configuration or template.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InputUnavailable { .. } | Error::EmptyResult)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Template(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
