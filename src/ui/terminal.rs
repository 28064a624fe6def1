//! Terminal UI implementation.

use std::io::Write;

use console::{style, Term};

use super::UserInterface;

/// Check whether colored output should be used.
///
/// Respects the `NO_COLOR` convention and falls back to the terminal's own
/// capability detection.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::colors_enabled()
}

/// Output implementation over real terminal streams.
pub struct TerminalUI {
    out: Term,
    err: Term,
    colors: bool,
    interactive: bool,
}

impl TerminalUI {
    /// Create a terminal UI.
    pub fn new(interactive: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            colors: should_use_colors(),
            interactive,
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        if self.colors {
            writeln!(self.out, "{}", style(msg).green()).ok();
        } else {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        if self.colors {
            writeln!(self.err, "{}", style(msg).red()).ok();
        } else {
            writeln!(self.err, "{}", msg).ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Create the UI for the current process environment.
pub fn create_ui(interactive: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(interactive))
}
