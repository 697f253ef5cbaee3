//! Reports produced by verification, extraction and normalization.

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one passed content check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// The pattern as written in the manifest.
    pub pattern: String,
    /// Name of the single member that matched.
    pub member: String,
    /// Digest of the member, equal to the expected one.
    pub sha256: String,
    /// Uncompressed member size in bytes.
    pub size: u64,
}

/// Digest of a single archive member, as listed by [`crate::list_members`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDigest {
    /// Member name as recorded in the archive.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Lowercase hex SHA-256 of the member's bytes.
    pub sha256: String,
}

/// Report of a successful archive verification.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    /// Path of the verified archive.
    pub archive: PathBuf,
    /// Total number of members in the archive.
    pub total_members: usize,
    /// One report per content check, in manifest order.
    pub checks: Vec<CheckReport>,
}

impl VerificationReport {
    /// Creates an empty report for `archive`.
    #[must_use]
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
            ..Self::default()
        }
    }
}

/// Report of an archive extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Directory the archive was extracted into.
    pub target_dir: PathBuf,

    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory members created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Whether a previous extraction directory was removed first.
    pub replaced_existing: bool,

    /// Duration of the extraction.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates an empty extraction report for `target_dir`.
    #[must_use]
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            ..Self::default()
        }
    }
}

/// A file moved by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRecord {
    /// Timestamp-named path before the rename.
    pub from: PathBuf,
    /// Stable path after the rename.
    pub to: PathBuf,
}

/// Per-archive result of a pipeline run.
#[derive(Debug, Clone)]
pub struct EntryReport {
    /// Verification result.
    pub verification: VerificationReport,
    /// Extraction result; `None` when the run only verified.
    pub extraction: Option<ExtractionReport>,
}

/// Report of a complete pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// One report per manifest entry, in manifest order.
    pub entries: Vec<EntryReport>,
    /// Files renamed by the normalizer.
    pub renamed: Vec<RenameRecord>,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl PipelineReport {
    /// Total number of content checks that passed.
    #[must_use]
    pub fn checks_passed(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.verification.checks.len())
            .sum()
    }

    /// Total number of files extracted across all archives.
    #[must_use]
    pub fn files_extracted(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|entry| entry.extraction.as_ref())
            .map(|extraction| extraction.files_extracted)
            .sum()
    }
}
