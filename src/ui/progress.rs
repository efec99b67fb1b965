//! Download progress with CI fallback

use super::context::UiContext;
use indicatif::{ProgressBar, ProgressStyle};

/// Byte progress for artifact downloads.
///
/// Shows an indicatif spinner with a live byte count in interactive
/// mode; in CI it stays quiet and lets the tracing lines speak.
pub struct DownloadProgress {
    bar: Option<ProgressBar>,
}

impl DownloadProgress {
    pub fn new(ctx: &UiContext, label: &str) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner:.cyan} Fetching {prefix}  {bytes:.bold}  {elapsed:.dim}")
                    .unwrap()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
            );
            bar.set_prefix(label.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(120));
            Some(bar)
        } else {
            None
        };
        Self { bar }
    }

    /// Update with the cumulative downloaded byte count
    pub fn on_bytes(&self, bytes: u64) {
        if let Some(ref bar) = self.bar {
            bar.set_position(bytes);
        }
    }

    /// Finish and clear the spinner
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_non_interactive() {
        let ctx = UiContext::non_interactive();
        let progress = DownloadProgress::new(&ctx, "model.zip");
        progress.on_bytes(1024);
        progress.on_bytes(4096);
        progress.finish();
        // Should not panic
    }
}
