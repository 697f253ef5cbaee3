//! Error types for library verification and extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A single failed content check inside an archive.
///
/// Failures are collected per archive rather than returned one at a time,
/// so a tampered bundle reports every mismatching member at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// No member name matched the pattern.
    #[error("no file matching the pattern '{pattern}' was found in the archive")]
    NotFound {
        /// The pattern as written in the manifest.
        pattern: String,
    },
    /// More than one member name matched the pattern.
    #[error("{count} files matching the pattern '{pattern}' were found in the archive")]
    NotUnique {
        /// The pattern as written in the manifest.
        pattern: String,
        /// Number of matching members.
        count: usize,
    },
    /// The matched member's digest differs from the expected one.
    #[error("hash mismatch for {member} (expected {expected}, got {actual})")]
    HashMismatch {
        /// Name of the matched member.
        member: String,
        /// Digest declared in the manifest.
        expected: String,
        /// Digest computed from the member's bytes.
        actual: String,
    },
    /// The matched member could not be read from the archive.
    #[error("failed to read {member}: {reason}")]
    Unreadable {
        /// Name of the matched member.
        member: String,
        /// Underlying reason reported by the archive reader.
        reason: String,
    },
}

/// Errors that can occur while processing a library manifest.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive declared in the manifest does not exist on disk.
    #[error("the specified library path does not exist: {}", path.display())]
    MissingArchive {
        /// Path of the missing archive.
        path: PathBuf,
    },

    /// The archive exists but cannot be read as a ZIP file.
    #[error("invalid archive {}: {reason}", path.display())]
    InvalidArchive {
        /// Path of the archive.
        path: PathBuf,
        /// Reason reported by the archive reader.
        reason: String,
    },

    /// A manifest pattern is not a valid regular expression.
    #[error("invalid member pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// The manifest file could not be parsed.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// One or more content checks failed for an archive.
    #[error(
        "verification of {} failed: {}",
        archive.display(),
        join_failures(failures)
    )]
    Verification {
        /// Path of the archive that failed verification.
        archive: PathBuf,
        /// Every failed check, in manifest order.
        failures: Vec<CheckFailure>,
    },

    /// A member name would be written outside the extraction directory.
    #[error("member '{member}' of {} escapes the extraction directory", archive.display())]
    PathTraversal {
        /// Path of the archive.
        archive: PathBuf,
        /// The offending member name.
        member: String,
    },
}

fn join_failures(failures: &[CheckFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Returns the individual check failures of a verification error.
    ///
    /// Returns an empty slice for every other variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use edalib_core::CheckFailure;
    /// use edalib_core::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::Verification {
    ///     archive: PathBuf::from("lib.zip"),
    ///     failures: vec![CheckFailure::NotFound {
    ///         pattern: "a".into(),
    ///     }],
    /// };
    /// assert_eq!(err.failures().len(), 1);
    ///
    /// let err = Error::InvalidManifest("bad".into());
    /// assert!(err.failures().is_empty());
    /// ```
    #[must_use]
    pub fn failures(&self) -> &[CheckFailure] {
        match self {
            Self::Verification { failures, .. } => failures,
            _ => &[],
        }
    }
}
