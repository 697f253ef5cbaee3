//! The verify → extract → normalize pipeline over a whole manifest.

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use log::info;

use crate::Error;
use crate::LibraryEntry;
use crate::Manifest;
use crate::Result;
use crate::archive::open_archive;
use crate::extract::extract_archive;
use crate::normalize::normalize_symbol_names;
use crate::report::EntryReport;
use crate::report::PipelineReport;
use crate::report::RenameRecord;
use crate::verify::verify_archive;

/// Processing state of one manifest entry.
///
/// Entries move `Pending → Verifying → Verified | Failed`; verified entries
/// continue `Extracting → Extracted` unless the run is verify-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Not processed yet.
    Pending,
    /// Content checks are running.
    Verifying,
    /// All content checks passed.
    Verified,
    /// At least one content check failed, or the archive is unusable.
    Failed,
    /// The archive is being unpacked.
    Extracting,
    /// The archive has been unpacked.
    Extracted,
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Verifying => "verifying",
            Self::Verified => "verified",
            Self::Failed => "failed",
            Self::Extracting => "extracting",
            Self::Extracted => "extracted",
        };
        f.write_str(name)
    }
}

/// Callback trait for following a pipeline run.
///
/// # Examples
///
/// ```
/// use edalib_core::EntryReport;
/// use edalib_core::EntryState;
/// use edalib_core::LibraryEntry;
/// use edalib_core::PipelineObserver;
/// use edalib_core::RenameRecord;
///
/// struct PrintPaths;
///
/// impl PipelineObserver for PrintPaths {
///     fn on_state_change(&mut self, _entry: &LibraryEntry, _state: EntryState) {}
///
///     fn on_entry_complete(&mut self, entry: &LibraryEntry, _report: &EntryReport) {
///         println!("{}", entry.path.display());
///     }
///
///     fn on_renamed(&mut self, record: &RenameRecord) {
///         println!("{} -> {}", record.from.display(), record.to.display());
///     }
/// }
/// ```
pub trait PipelineObserver {
    /// Called whenever an entry changes state.
    fn on_state_change(&mut self, entry: &LibraryEntry, state: EntryState);

    /// Called once an entry has been fully processed.
    fn on_entry_complete(&mut self, entry: &LibraryEntry, report: &EntryReport);

    /// Called for every file renamed by the normalizer.
    fn on_renamed(&mut self, record: &RenameRecord);
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_state_change(&mut self, _entry: &LibraryEntry, _state: EntryState) {}

    fn on_entry_complete(&mut self, _entry: &LibraryEntry, _report: &EntryReport) {}

    fn on_renamed(&mut self, _record: &RenameRecord) {}
}

/// Runs a manifest against a project root.
///
/// The run is fail-fast: the first entry that fails verification aborts it.
/// Entries before it stay extracted; entries after it are not touched.
pub struct Pipeline<'a> {
    manifest: &'a Manifest,
    root: PathBuf,
    extract: bool,
}

impl<'a> Pipeline<'a> {
    /// Creates a full verify-and-extract pipeline rooted at `root`.
    pub fn new(manifest: &'a Manifest, root: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            root: root.into(),
            extract: true,
        }
    }

    /// Restricts the run to verification; nothing is written to disk.
    #[must_use]
    pub fn verify_only(mut self) -> Self {
        self.extract = false;
        self
    }

    /// Checks that every archive in the manifest exists.
    ///
    /// Runs before any entry is processed so that a missing archive aborts
    /// the run before any extraction directory is modified.
    pub fn check_archives_present(&self) -> Result<()> {
        match self
            .manifest
            .entries()
            .iter()
            .map(|entry| self.root.join(&entry.path))
            .find(|path| !path.exists())
        {
            Some(path) => Err(Error::MissingArchive { path }),
            None => Ok(()),
        }
    }

    /// Runs the pipeline without observing it.
    pub fn run(&self) -> Result<PipelineReport> {
        self.run_with_observer(&mut NoopObserver)
    }

    /// Runs the pipeline, reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered: a missing archive, a failed
    /// verification (carrying every failed check of that archive), or an
    /// extraction/normalization I/O error.
    pub fn run_with_observer(
        &self,
        observer: &mut dyn PipelineObserver,
    ) -> Result<PipelineReport> {
        let start = Instant::now();
        let mut report = PipelineReport::default();

        for entry in self.manifest.entries() {
            observer.on_state_change(entry, EntryState::Pending);
        }
        self.check_archives_present()?;

        for entry in self.manifest.entries() {
            observer.on_state_change(entry, EntryState::Verifying);
            let archive_path = self.root.join(&entry.path);
            let verified = open_archive(&archive_path).and_then(|mut archive| {
                verify_archive(&archive_path, &mut archive, entry).map(|report| (archive, report))
            });
            let (mut archive, verification) = match verified {
                Ok(verified) => verified,
                Err(e) => {
                    observer.on_state_change(entry, EntryState::Failed);
                    return Err(e);
                }
            };
            observer.on_state_change(entry, EntryState::Verified);

            let extraction = if self.extract {
                observer.on_state_change(entry, EntryState::Extracting);
                let extraction = match extract_archive(&archive_path, &mut archive) {
                    Ok(extraction) => extraction,
                    Err(e) => {
                        observer.on_state_change(entry, EntryState::Failed);
                        return Err(e);
                    }
                };
                observer.on_state_change(entry, EntryState::Extracted);
                Some(extraction)
            } else {
                None
            };

            let entry_report = EntryReport {
                verification,
                extraction,
            };
            observer.on_entry_complete(entry, &entry_report);
            report.entries.push(entry_report);
        }

        if self.extract {
            let rule = self.manifest.normalize_rule();
            for scan_root in self.manifest.scan_roots() {
                for record in normalize_symbol_names(self.root.join(scan_root), rule)? {
                    observer.on_renamed(&record);
                    report.renamed.push(record);
                }
            }
        }

        report.duration = start.elapsed();
        info!(
            "processed {} archives, renamed {} files in {:?}",
            report.entries.len(),
            report.renamed.len(),
            report.duration
        );
        Ok(report)
    }
}
