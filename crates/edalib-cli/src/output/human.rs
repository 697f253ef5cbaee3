//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use edalib_core::EntryReport;
use edalib_core::MemberDigest;
use edalib_core::PipelineReport;
use edalib_core::RenameRecord;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn checkmark(&self, line: &str) -> String {
        if self.use_colors {
            format!("{} {line}", style("✓").green().bold())
        } else {
            line.to_string()
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_entry(&self, archive: &Path, report: &EntryReport) {
        if self.quiet {
            return;
        }

        let _ = self
            .term
            .write_line(&self.checkmark(&archive.display().to_string()));

        if !self.verbose {
            return;
        }

        for check in &report.verification.checks {
            let _ = self.term.write_line(&format!(
                "    {}  {}",
                &check.sha256[..12.min(check.sha256.len())],
                check.member
            ));
        }
        if let Some(extraction) = &report.extraction {
            let _ = self.term.write_line(&format!(
                "    -> {} ({} files, {})",
                extraction.target_dir.display(),
                extraction.files_extracted,
                Self::format_size(extraction.bytes_written)
            ));
        }
    }

    fn format_rename(&self, record: &RenameRecord) {
        if self.quiet || !self.verbose {
            return;
        }

        let _ = self.term.write_line(&format!(
            "  Renamed {} -> {}",
            record.from.display(),
            record.to.display()
        ));
    }

    fn format_pipeline_report(&self, operation: &str, report: &PipelineReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let headline = if operation == "verify" {
            format!(
                "Verified {} archives ({} checks passed)",
                report.entries.len(),
                report.checks_passed()
            )
        } else {
            format!(
                "Synced {} archives ({} checks passed, {} files extracted, {} symbol files renamed)",
                report.entries.len(),
                report.checks_passed(),
                report.files_extracted(),
                report.renamed.len()
            )
        };

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{}", style(headline).green().bold()));
        } else {
            let _ = self.term.write_line(&headline);
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_member_digests(&self, archive: &Path, digests: &[MemberDigest]) -> Result<()> {
        if !self.quiet && self.verbose {
            let _ = self.term.write_line(&format!(
                "{} ({} members)",
                archive.display(),
                digests.len()
            ));
        }

        // Digests are the payload of the command, so quiet mode still prints them.
        for digest in digests {
            if self.verbose {
                let _ = self.term.write_line(&format!(
                    "{}  {:>10}  {}",
                    digest.sha256,
                    Self::format_size(digest.size),
                    digest.name
                ));
            } else {
                let _ = self
                    .term
                    .write_line(&format!("{}  {}", digest.sha256, digest.name));
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn is_interactive(&self) -> bool {
        !self.quiet && self.term.is_term()
    }
}
