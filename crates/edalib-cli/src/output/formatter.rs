//! Output formatter trait for CLI results.

use anyhow::Result;
use edalib_core::EntryReport;
use edalib_core::MemberDigest;
use edalib_core::PipelineReport;
use edalib_core::RenameRecord;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Report one processed archive, as soon as it is done
    fn format_entry(&self, archive: &Path, report: &EntryReport);

    /// Report one renamed symbol file
    fn format_rename(&self, record: &RenameRecord);

    /// Format the summary of a sync or verify run
    fn format_pipeline_report(&self, operation: &str, report: &PipelineReport) -> Result<()>;

    /// Format the member digests of one archive
    fn format_member_digests(&self, archive: &Path, digests: &[MemberDigest]) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Returns `true` if streaming output may be interleaved with a progress bar
    fn is_interactive(&self) -> bool;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
