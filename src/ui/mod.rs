//! Operator-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] for real terminal usage (errors go to stderr)
//! - [`MockUI`] spy for tests
//!
//! Handlers never print directly; they report through this trait, which is
//! what lets the dispatcher tests assert on exactly what the operator saw.

pub mod mock;
pub mod terminal;

pub use mock::MockUI;
pub use terminal::{create_ui, TerminalUI};

/// Trait for operator-facing output.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display an error message (error stream).
    fn error(&mut self, msg: &str);

    /// Check if attached to an interactive terminal.
    fn is_interactive(&self) -> bool;
}
