//! Terminal styling helpers

use owo_colors::OwoColorize;

/// Check mark used in summaries
pub const CHECK: &str = "✓";

/// Cross used in summaries
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold, for headings and key values
    fn emphasis(&self) -> String;
    /// Dimmed, for secondary information
    fn muted(&self) -> String;
    /// Cyan, for identifiers
    fn accent(&self) -> String;
    /// Green
    fn success(&self) -> String;
    /// Red
    fn failure(&self) -> String;
}

impl<T: std::fmt::Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn failure(&self) -> String {
        self.red().to_string()
    }
}

/// Styled verdict marker
pub fn verdict(ok: bool) -> String {
    if ok { CHECK.success() } else { CROSS.failure() }
}
