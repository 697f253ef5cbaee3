//! Error conversion utilities for CLI.
//!
//! Converts edalib-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use edalib_core::Error;
use std::fmt::Write;

/// Converts a core `Error` to a user-friendly anyhow error with context
pub fn convert_error(err: Error) -> anyhow::Error {
    match err {
        Error::MissingArchive { path } => {
            anyhow!(
                "Library archive not found: {}\n\
                 HINT: Download the archive into place first; edalib never fetches libraries.",
                path.display()
            )
        }
        Error::Verification { archive, failures } => {
            let mut message = format!(
                "Verification failed for '{}' ({} of its checks failed):",
                archive.display(),
                failures.len()
            );
            for failure in &failures {
                let _ = write!(message, "\n  - {failure}");
            }
            message.push_str(
                "\nHINT: The archive differs from the pinned copy. If the library was \
                 updated on purpose, run `edalib hash <ARCHIVE>` and update the manifest.",
            );
            anyhow!(message)
        }
        Error::InvalidArchive { path, reason } => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or truncated. Download it again.",
                path.display(),
                reason
            )
        }
        Error::PathTraversal { archive, member } => {
            anyhow!(
                "Security violation: Archive '{}' contains member '{}' that escapes its extraction directory\n\
                 HINT: This archive may be malicious. Do not extract it.",
                archive.display(),
                member
            )
        }
        Error::InvalidManifest(reason) => anyhow!("Invalid manifest: {reason}"),
        Error::InvalidPattern { pattern, source } => {
            anyhow!("Invalid member pattern '{pattern}' in manifest: {source}")
        }
        Error::Io(io_err) => anyhow!("I/O error: {io_err}"),
    }
}

/// Converts the error of a core result into a contextual anyhow error
pub fn add_context<T>(result: Result<T, Error>) -> anyhow::Result<T> {
    result.map_err(convert_error)
}
