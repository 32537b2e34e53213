//! Console output for the theme operations.
//!
//! Every line starts with a fixed marker: `+` for phases and results, `-` for
//! sub-steps, `->` for per-entry progress and `!` for problems. Markers are
//! coloured only when stdout is a terminal.

use crossterm::style::{Color, Stylize};
use gsth_core::{Reporter, ThemeError};
use std::io::IsTerminal;

/// A handle for printing operation progress to stdout.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    color: bool,
}

impl Output {
    /// Create a new output handle, colouring markers if stdout is a tty.
    pub fn new() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    /// Plain output, no escape sequences.
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn marker(&self, marker: &str, color: Color) -> String {
        if self.color {
            marker.with(color).bold().to_string()
        } else {
            marker.to_string()
        }
    }

    /// Format one line with its marker. Kept separate from printing for tests.
    fn line(&self, indent: &str, marker: &str, color: Color, msg: &str) -> String {
        format!("{indent}{} {msg}", self.marker(marker, color))
    }

    /// Print an operation failure: headline after `!`, details indented.
    pub fn error(&self, err: &ThemeError) {
        for line in self.error_lines(err) {
            println!("{line}");
        }
    }

    fn error_lines(&self, err: &ThemeError) -> Vec<String> {
        let mut lines = vec![self.line("", "!", Color::Red, &err.to_string())];
        lines.extend(err.details().iter().map(|d| format!("  {d}")));
        lines
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for Output {
    fn section(&self, title: &str) {
        println!("{}", self.line("", "+", Color::Green, title));
    }

    fn step(&self, msg: &str) {
        println!("{}", self.line("  ", "-", Color::Cyan, msg));
    }

    fn item(&self, msg: &str) {
        println!("{}", self.line("  ", "->", Color::DarkGrey, msg));
    }

    fn detail(&self, msg: &str) {
        println!("  {msg}");
    }

    fn success(&self, msg: &str) {
        println!("{}", self.line("", "+", Color::Green, msg));
    }

    fn warning(&self, msg: &str) {
        println!("{}", self.line("", "!", Color::Yellow, msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_lines() {
        let output = Output::plain();
        assert_eq!(
            output.line("  ", "-", Color::Cyan, "Copying gresource file ..."),
            "  - Copying gresource file ..."
        );
        assert_eq!(
            output.line("  ", "->", Color::DarkGrey, "Extracting gdm.css ..."),
            "  -> Extracting gdm.css ..."
        );
    }

    #[test]
    fn test_error_lines() {
        let output = Output::plain();
        let err = ThemeError::MissingProjectFolder {
            path: PathBuf::from("/home/me/mytheme"),
        };
        assert_eq!(
            output.error_lines(&err),
            vec!["! The folder of project is not found:", "  /home/me/mytheme"]
        );
    }

    #[test]
    fn test_colored_marker_keeps_message() {
        let output = Output { color: true };
        let line = output.line("", "!", Color::Yellow, "The gresource file is not found:");
        assert!(line.ends_with(" The gresource file is not found:"));
        assert!(line.contains('\u{1b}'));
    }
}
