//! sipsh - Interactive SIP2 client shell.
//!
//! sipsh opens a session against a SIP2 (Standard Interchange Protocol v2)
//! library-system server and lets an operator drive it by hand: connect,
//! authenticate, and issue protocol requests one typed line at a time,
//! watching raw and interpreted responses.
//!
//! # Modules
//!
//! - [`cli`] - Process-level flags (clap)
//! - [`config`] - Config file loading and schema
//! - [`dispatcher`] - Command registry, line execution, session state
//! - [`error`] - Error types and result alias
//! - [`repl`] - The interactive line loop
//! - [`sip`] - SIP2 protocol client (traits, wire codec, TCP transport)
//! - [`ui`] - Operator-facing output
//!
//! # Example
//!
//! ```
//! use sipsh::config::SessionConfig;
//! use sipsh::dispatcher::CommandDispatcher;
//! use sipsh::sip::MockConnector;
//! use sipsh::ui::MockUI;
//!
//! let mut dispatcher =
//!     CommandDispatcher::new(SessionConfig::default(), Box::new(MockConnector::new()));
//! let mut ui = MockUI::new();
//!
//! let outcome = dispatcher.run("echo hello", &mut ui);
//! assert!(outcome.succeeded());
//! assert!(ui.has_message("hello"));
//! ```

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod repl;
pub mod sip;
pub mod ui;

pub use error::{Result, SipshError};
