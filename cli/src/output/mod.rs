//! Terminal output: styles, spinners, and the human and JSON renderers.

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

/// Where human output goes and how it looks.
pub struct OutputContext {
    pub styles: Styles,
    /// Whether stdout is a terminal.
    pub is_tty: bool,
    /// Suppresses everything but errors.
    pub quiet: bool,
}

impl OutputContext {
    /// Color is used only on a terminal and only when neither `--no-color`
    /// nor `NO_COLOR` asks otherwise.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let mut styles = Styles::default();
        if is_tty && !no_color && std::env::var_os("NO_COLOR").is_none() {
            styles.colorize();
        }
        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on an interactive, non-quiet terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    pub fn success(&self, msg: &str) {
        self.emit(format_args!("  {} {msg}", "✓".style(self.styles.success)));
    }

    pub fn warn(&self, msg: &str) {
        self.emit(format_args!("  {} {msg}", "⚠".style(self.styles.warning)));
    }

    pub fn info(&self, msg: &str) {
        self.emit(format_args!("  {} {msg}", "ℹ".style(self.styles.info)));
    }

    pub fn header(&self, msg: &str) {
        self.emit(format_args!("  {}", msg.style(self.styles.header)));
    }

    /// `key  value`, key dimmed.
    pub fn kv(&self, key: &str, value: &str) {
        self.emit(format_args!("  {}  {value}", key.style(self.styles.dim)));
    }

    /// One indented entry of a listing, such as a node name.
    pub fn item(&self, name: &str) {
        self.emit(format_args!("    {}", name.style(self.styles.node)));
    }

    fn emit(&self, line: std::fmt::Arguments<'_>) {
        if !self.quiet {
            println!("{line}");
        }
    }
}
