use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives work counters while a query job is still running.
pub trait ProgressSink {
    /// Only called once the server knows the total (`total_work > 0`).
    fn update(&mut self, total_work: u64, work_done: u64);

    /// May be called more than once; calls after the first are no-ops.
    fn finish(&mut self);
}

/// Terminal progress bar on stderr. `hidden()` gives a no-op for `--no-progress`.
pub struct QueryProgress {
    bar: Option<ProgressBar>,
}

impl QueryProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40}] {percent}%") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message("Searching...");

        Self { bar: Some(bar) }
    }

    pub fn hidden() -> Self {
        Self { bar: None }
    }
}

impl Default for QueryProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for QueryProgress {
    fn update(&mut self, total_work: u64, work_done: u64) {
        if let Some(bar) = &self.bar {
            bar.set_length(total_work);
            bar.set_position(work_done.min(total_work));
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
