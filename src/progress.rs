//! Progress reporting for tender generation
//!
//! The orchestrator reports one event per finished section and releases
//! the reporter exactly once when the run ends, whether it succeeded or not.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::types::Section;

/// A section has been generated
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Sections finished so far, including this one
    pub completed: usize,
    /// Sections in the whole run
    pub total: usize,
    /// The section just finished
    pub section: Section,
    /// Human-readable status line
    pub status: String,
}

impl ProgressEvent {
    /// Share of the run completed, from 0.0 to 1.0
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Receives progress from a generation run
pub trait ProgressReporter: Send {
    /// Work on `section` is about to start
    fn section_started(&mut self, _section: Section) {}

    /// A section finished
    fn report(&mut self, event: &ProgressEvent);

    /// Release the indicator. Called once per run on every exit path.
    fn finish(&mut self);
}

/// Terminal progress bar
///
/// Features:
/// - Percentage bar with spinner
/// - Status message naming the section in progress
/// - Cleared from the terminal when the run ends
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    /// Create a visible progress bar (10 FPS spinner)
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}% | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Create a bar that draws nothing (quiet mode)
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Current bar position in percent
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for TerminalProgress {
    fn section_started(&mut self, section: Section) {
        self.bar.set_message(format!("Generating {}...", section));
    }

    fn report(&mut self, event: &ProgressEvent) {
        let pos = (event.fraction() * 100.0).round() as u64;
        self.bar.set_position(pos);
        self.bar.set_message(event.status.clone());
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// In-memory reporter that keeps every event
#[derive(Debug, Default, Clone)]
pub struct ProgressRecorder {
    pub started: Vec<Section>,
    pub events: Vec<ProgressEvent>,
    pub finish_count: usize,
}

impl ProgressRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fractions reported so far, in order
    pub fn fractions(&self) -> Vec<f64> {
        self.events.iter().map(ProgressEvent::fraction).collect()
    }
}

impl ProgressReporter for ProgressRecorder {
    fn section_started(&mut self, section: Section) {
        self.started.push(section);
    }

    fn report(&mut self, event: &ProgressEvent) {
        self.events.push(event.clone());
    }

    fn finish(&mut self) {
        self.finish_count += 1;
    }
}
