//! SIP2 protocol client.
//!
//! The dispatcher talks to the server through two trait seams, so tests can
//! substitute a scripted collaborator:
//!
//! - [`Connector`] - opens a session against a server
//! - [`SipSession`] - a live connection that can issue requests
//!
//! # Architecture
//!
//! - [`message`] - Wire frame encoding/parsing and field lookup
//! - [`connection`] - TCP-backed implementations of both traits
//! - [`mock`] - Scripted in-memory implementations for tests

pub mod connection;
pub mod message;
pub mod mock;

pub use connection::{SipConnection, TcpConnector};
pub use message::Message;
pub use mock::{CallLog, MockConnector, MockSession};

use crate::error::Result;

/// A live SIP2 session.
///
/// At most one exists at a time; the dispatcher owns it exclusively and
/// replaces it wholesale on every successful connect.
pub trait SipSession {
    /// Send a 93 Login request. The boolean is the server's verdict.
    fn login(&mut self, username: &str, password: &str, location_code: &str) -> Result<bool>;

    /// Send a 99 SC Status request and return the 98 response.
    fn sc_status(&mut self) -> Result<Message>;

    /// Send a 63 Patron Information request and return the 64 response.
    fn patron_info(&mut self, barcode: &str) -> Result<Message>;
}

/// Opens SIP2 sessions.
///
/// The institution is fixed at connect time and scopes every request the
/// session issues.
pub trait Connector {
    /// Open a session against `server:port`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SipshError::Network`] when the server is
    /// unreachable, refuses the connection, or times out.
    fn connect(&self, server: &str, port: u16, institution: &str) -> Result<Box<dyn SipSession>>;
}
