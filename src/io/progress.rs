//! Terminal progress for database loading and the grid scan

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates the progress bars of one run
///
/// Each stage gets its own bar under a shared [`MultiProgress`]; a stage
/// that was never started simply has no bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    load_bar: Option<ProgressBar>,
    scan_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static LOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>8}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static SCAN_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>8}} [{{bar:{PROGRESS_BAR_WIDTH}.green/blue}}] {{pos}}/{{len}} rows [{{elapsed_precise}}]"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

impl ProgressManager {
    /// Create a progress manager with no active bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            load_bar: None,
            scan_bar: None,
        }
    }

    /// Begin tracking a directory scan of `file_count` files
    pub fn start_loading(&mut self, label: &str, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(LOAD_STYLE.clone());
        bar.set_prefix(label.to_string());
        self.load_bar = Some(self.multi_progress.add(bar));
    }

    /// Report that `path` is about to be decoded
    pub fn advance_loading(&self, path: &Path) {
        if let Some(ref bar) = self.load_bar {
            bar.set_message(
                path.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
            bar.inc(1);
        }
    }

    /// Begin tracking a grid scan of `rows` rows
    pub fn start_scan(&mut self, rows: u32) {
        if let Some(ref bar) = self.load_bar {
            bar.finish_with_message("done");
        }
        let bar = ProgressBar::new(u64::from(rows));
        bar.set_style(SCAN_STYLE.clone());
        bar.set_prefix("compose");
        self.scan_bar = Some(self.multi_progress.add(bar));
    }

    /// Report the number of rows composed so far
    pub fn update_rows(&self, rows_completed: u32) {
        if let Some(ref bar) = self.scan_bar {
            bar.set_position(u64::from(rows_completed));
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for bar in [&self.load_bar, &self.scan_bar].into_iter().flatten() {
            bar.finish();
        }
        let _ = self.multi_progress.clear();
    }
}
