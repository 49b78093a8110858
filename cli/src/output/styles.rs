//! Terminal stylesheet.

use owo_colors::Style;

/// Colors for the status glyphs and labels kindpush prints.
///
/// `Default` is the plain stylesheet used when color is off.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub info: Style,
    /// Labels of key/value lines.
    pub dim: Style,
    pub header: Style,
    /// Node names in listings.
    pub node: Style,
}

impl Styles {
    /// Switch every entry to its colored form.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
        self.node = Style::new().bold();
    }
}
