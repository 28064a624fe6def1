//! Error types for sipsh operations.
//!
//! This module defines [`SipshError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Handler failures (unknown command, missing argument, precondition not
//!   met, auth rejection, offline server) are reported through the UI and
//!   surfaced as command outcomes; they never escape the dispatcher
//! - `SipshError` is for errors that cross module boundaries (client I/O,
//!   frame parsing, bootstrap)
//! - Use `anyhow::Error` (via `SipshError::Other`) for unexpected errors

use thiserror::Error;

/// Core error type for sipsh operations.
#[derive(Debug, Error)]
pub enum SipshError {
    /// No command registered under the given name.
    #[error("Command not found: {name}")]
    CommandNotFound { name: String },

    /// A command that needs a live session was run before a successful connect.
    #[error("Not connected; run 'connect' first")]
    NotConnected,

    /// Transport-level failure talking to the SIP server.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A response frame could not be interpreted.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for sipsh operations.
pub type Result<T> = std::result::Result<T, SipshError>;
