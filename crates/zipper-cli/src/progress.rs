//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::HumanBytes;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use zipper_core::ProgressCallback;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Shows the entry count, the bytes streamed so far, the entry being
/// processed and elapsed time.
/// The bar length is set from the first `on_entry_start` call, since the
/// number of entries is only known once the operation has started.
pub struct CliProgress {
    bar: ProgressBar,
    action: String,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a new CLI progress bar.
    ///
    /// * `action` - Verb shown before the entry name (e.g. "Packing")
    #[must_use]
    pub fn new(action: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "[████████░░░░] 42/100 1.50 KiB Packing dir/indir/file1.txt (3s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {prefix} {wide_msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        bar.set_message(action.to_string());
        bar.set_prefix(HumanBytes(0).to_string());

        Self {
            bar,
            action: action.to_string(),
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (stderr is a terminal).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, name: &str, total: usize, _current: usize) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
        self.bar.set_message(format!("{} {name}", self.action));
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
    }

    fn on_entry_complete(&mut self, _name: &str) {
        self.bar.set_prefix(HumanBytes(self.bytes_written).to_string());
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_callback() {
        let mut progress = CliProgress::new("Testing");

        progress.on_entry_start("dir/file2.txt", 3, 1);
        progress.on_bytes_written(1024);
        progress.on_entry_complete("dir/file2.txt");

        assert_eq!(progress.bytes_written, 1024);
        assert_eq!(progress.bar.prefix(), HumanBytes(1024).to_string());
        assert_eq!(progress.bar.length(), Some(3));
        assert_eq!(progress.bar.position(), 1);
    }
}
