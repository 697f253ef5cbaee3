//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use edalib_core::EntryReport;
use edalib_core::MemberDigest;
use edalib_core::PipelineReport;
use edalib_core::RenameRecord;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter {
    operation: &'static str,
}

impl JsonFormatter {
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CheckOutput {
    pattern: String,
    member: String,
    sha256: String,
    size: u64,
}

#[derive(Serialize)]
struct ArchiveOutput {
    archive: String,
    total_members: usize,
    checks: Vec<CheckOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    files_extracted: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_written: Option<u64>,
}

#[derive(Serialize)]
struct RenameOutput {
    from: String,
    to: String,
}

impl From<&EntryReport> for ArchiveOutput {
    fn from(report: &EntryReport) -> Self {
        let extraction = report.extraction.as_ref();
        Self {
            archive: report.verification.archive.display().to_string(),
            total_members: report.verification.total_members,
            checks: report
                .verification
                .checks
                .iter()
                .map(|check| CheckOutput {
                    pattern: check.pattern.clone(),
                    member: check.member.clone(),
                    sha256: check.sha256.clone(),
                    size: check.size,
                })
                .collect(),
            target_dir: extraction.map(|e| e.target_dir.display().to_string()),
            files_extracted: extraction.map(|e| e.files_extracted),
            bytes_written: extraction.map(|e| e.bytes_written),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    // Streaming events are folded into the final report.
    fn format_entry(&self, _archive: &Path, _report: &EntryReport) {}

    fn format_rename(&self, _record: &RenameRecord) {}

    fn format_pipeline_report(&self, operation: &str, report: &PipelineReport) -> Result<()> {
        #[derive(Serialize)]
        struct PipelineOutput {
            archives: Vec<ArchiveOutput>,
            checks_passed: usize,
            files_extracted: usize,
            renamed: Vec<RenameOutput>,
            duration_ms: u128,
        }

        let data = PipelineOutput {
            archives: report.entries.iter().map(ArchiveOutput::from).collect(),
            checks_passed: report.checks_passed(),
            files_extracted: report.files_extracted(),
            renamed: report
                .renamed
                .iter()
                .map(|record| RenameOutput {
                    from: record.from.display().to_string(),
                    to: record.to.display().to_string(),
                })
                .collect(),
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success(operation, data))
    }

    fn format_member_digests(&self, archive: &Path, digests: &[MemberDigest]) -> Result<()> {
        #[derive(Serialize)]
        struct MemberOutput<'a> {
            name: &'a str,
            size: u64,
            sha256: &'a str,
        }

        #[derive(Serialize)]
        struct HashOutput<'a> {
            archive: String,
            members: Vec<MemberOutput<'a>>,
        }

        let data = HashOutput {
            archive: archive.display().to_string(),
            members: digests
                .iter()
                .map(|digest| MemberOutput {
                    name: &digest.name,
                    size: digest.size,
                    sha256: &digest.sha256,
                })
                .collect(),
        };

        Self::output(&JsonOutput::success(self.operation, data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error(self.operation, format!("{error:#}"));
        if let Ok(json) = serde_json::to_string_pretty(&output) {
            let _ = writeln!(io::stdout(), "{json}");
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
