//! Progress display for pipeline runs.

use crate::output::OutputFormatter;
use edalib_core::EntryReport;
use edalib_core::EntryState;
use edalib_core::LibraryEntry;
use edalib_core::PipelineObserver;
use edalib_core::RenameRecord;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;

/// CLI observer forwarding pipeline events to the output formatter.
///
/// On a TTY a progress bar shows the entry being processed; per-archive
/// lines are printed above it. Automatically cleans up on drop.
pub struct CliProgress<'a> {
    bar: Option<ProgressBar>,
    formatter: &'a dyn OutputFormatter,
}

impl<'a> CliProgress<'a> {
    /// Creates an observer for a run over `total` archives.
    #[must_use]
    pub fn new(total: usize, formatter: &'a dyn OutputFormatter) -> Self {
        let bar = formatter.is_interactive().then(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{bar:30.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▓░"),
            );
            bar
        });

        Self { bar, formatter }
    }

    fn print(&self, f: impl FnOnce()) {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

impl Drop for CliProgress<'_> {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl PipelineObserver for CliProgress<'_> {
    fn on_state_change(&mut self, entry: &LibraryEntry, state: EntryState) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{state} {}", entry.path.display()));
        }
    }

    fn on_entry_complete(&mut self, entry: &LibraryEntry, report: &EntryReport) {
        self.print(|| self.formatter.format_entry(&entry.path, report));
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_renamed(&mut self, record: &RenameRecord) {
        self.print(|| self.formatter.format_rename(record));
    }
}
