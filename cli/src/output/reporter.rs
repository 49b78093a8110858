//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// On a TTY, `step()` drives a spinner and per-node lines are printed above
/// it. Otherwise each event is a plain line:
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ⚠ {message}"` (suppressed when `ctx.quiet`)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: Option<ProgressBar>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        let spinner = ctx.show_progress().then(|| progress::spinner(""));
        Self { ctx, spinner }
    }

    /// Stop the spinner, leaving `message` as its last line.
    pub fn finish(&self, ok: bool, message: &str) {
        match &self.spinner {
            Some(pb) if ok => progress::finish_ok(pb, message),
            Some(pb) => progress::finish_error(pb, message),
            None => {}
        }
    }

    fn line(&self, line: String) {
        if self.ctx.quiet {
            return;
        }
        match &self.spinner {
            Some(pb) => pb.println(line),
            None => println!("{line}"),
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        match &self.spinner {
            Some(pb) => pb.set_message(message.to_string()),
            None => self.line(format!("  {} {message}", "→".style(self.ctx.styles.info))),
        }
    }

    fn success(&self, message: &str) {
        self.line(format!("  {} {message}", "✓".style(self.ctx.styles.success)));
    }

    fn warn(&self, message: &str) {
        self.line(format!("  {} {message}", "⚠".style(self.ctx.styles.warning)));
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        if let Some(pb) = &self.spinner
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
