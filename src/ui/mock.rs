//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all output for
//! later assertion. Besides the per-kind vectors it keeps a combined
//! transcript, so tests can assert on ordering across message kinds.
//!
//! # Example
//!
//! ```
//! use sipsh::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Commands:");
//! ui.error("Command not found: bogus");
//!
//! assert!(ui.has_message("Commands:"));
//! assert!(ui.has_error("bogus"));
//! ```

use super::UserInterface;

/// Mock UI that captures all output.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    errors: Vec<String>,
    transcript: Vec<String>,
    interactive: bool,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured plain messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get everything captured, in emission order, regardless of kind.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Check if a specific plain message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured output.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.errors.clear();
        self.transcript.clear();
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
        self.transcript.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
        self.transcript.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
        self.transcript.push(msg.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
