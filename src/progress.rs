//! Progress display while version lists are fetched
//!
//! Drawn on stderr with indicatif so stdout stays clean for the table or JSON.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const BAR_TEMPLATE: &str = "{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}";
const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Spinner while go.mod is read, then a bar over the dependencies being fetched
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Show a spinner for an indeterminate step
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }
        let style = ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .map(|s| s.tick_chars(SPINNER_TICKS));
        self.show(ProgressBar::new_spinner(), style.ok(), message, 80);
    }

    /// Start a bar over `total` dependencies; nothing is drawn for an empty run
    pub fn start(&mut self, total: u64, message: &str) {
        if !self.enabled || total == 0 {
            return;
        }
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .map(|s| s.progress_chars("█▓▒░"));
        self.show(ProgressBar::new(total), style.ok(), message, 100);
    }

    fn show(
        &mut self,
        bar: ProgressBar,
        style: Option<ProgressStyle>,
        message: &str,
        tick_ms: u64,
    ) {
        if let Some(style) = style {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(tick_ms));
        if let Some(previous) = self.bar.replace(bar) {
            previous.finish_and_clear();
        }
    }

    /// Handle that spawned fetch tasks advance on their own
    pub fn handle(&self) -> Option<ProgressBar> {
        self.bar.clone()
    }

    /// Count a dependency that needed no fetch
    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
