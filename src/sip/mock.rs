//! Scripted SIP collaborators for testing.
//!
//! `MockConnector` implements [`Connector`] with configurable outcomes and
//! records every call made through it, so tests can assert not just on what
//! was printed but on which protocol operations actually ran (and how many
//! times).
//!
//! # Example
//!
//! ```
//! use sipsh::sip::{Connector, MockConnector, SipSession};
//!
//! let connector = MockConnector::new().with_login_ok(false);
//! let mut session = connector.connect("sip.example.org", 6001, "main").unwrap();
//! assert!(!session.login("user", "pass", "desk").unwrap());
//! assert_eq!(connector.log().login, 1);
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{Result, SipshError};
use crate::sip::message::Message;
use crate::sip::{Connector, SipSession};

/// Invocation record shared between a connector and its sessions.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    /// Number of connect attempts.
    pub connect: usize,
    /// Number of login requests.
    pub login: usize,
    /// Number of SC Status requests.
    pub sc_status: usize,
    /// Number of patron-information requests.
    pub patron_info: usize,
    /// Barcodes passed to patron-information requests, in order.
    pub barcodes: Vec<String>,
    /// Credentials passed to login requests, in order.
    pub logins: Vec<(String, String, String)>,
}

/// Connector with scripted outcomes. Defaults to success at every step.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    log: Arc<Mutex<CallLog>>,
    refuse_connect: bool,
    reject_login: bool,
    offline: bool,
}

impl MockConnector {
    /// All-success collaborator: connect works, login passes, server online.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every connect attempt fails with a network error.
    pub fn refusing_connect(mut self) -> Self {
        self.refuse_connect = true;
        self
    }

    /// Script the login verdict.
    pub fn with_login_ok(mut self, ok: bool) -> Self {
        self.reject_login = !ok;
        self
    }

    /// Script whether the 98 response reports the server online.
    pub fn with_online(mut self, online: bool) -> Self {
        self.offline = !online;
        self
    }

    /// Snapshot of everything called so far.
    pub fn log(&self) -> CallLog {
        self.log.lock().expect("call log poisoned").clone()
    }
}

impl Connector for MockConnector {
    fn connect(&self, server: &str, _port: u16, institution: &str) -> Result<Box<dyn SipSession>> {
        self.log.lock().expect("call log poisoned").connect += 1;
        if self.refuse_connect {
            return Err(SipshError::Network {
                message: format!("{}: connection refused", server),
            });
        }
        Ok(Box::new(MockSession {
            log: Arc::clone(&self.log),
            institution: institution.to_string(),
            reject_login: self.reject_login,
            offline: self.offline,
        }))
    }
}

/// Session handed out by [`MockConnector`].
#[derive(Debug)]
pub struct MockSession {
    log: Arc<Mutex<CallLog>>,
    institution: String,
    reject_login: bool,
    offline: bool,
}

impl SipSession for MockSession {
    fn login(&mut self, username: &str, password: &str, location_code: &str) -> Result<bool> {
        let mut log = self.log.lock().expect("call log poisoned");
        log.login += 1;
        log.logins.push((
            username.to_string(),
            password.to_string(),
            location_code.to_string(),
        ));
        Ok(!self.reject_login)
    }

    fn sc_status(&mut self) -> Result<Message> {
        self.log.lock().expect("call log poisoned").sc_status += 1;
        let online = if self.offline { "N" } else { "Y" };
        Ok(Message::new("98")
            .with_fixed("online_status", online)
            .with_fixed("checkin_ok", "Y")
            .with_fixed("checkout_ok", "Y")
            .with_fixed("acs_renewal_policy", "Y")
            .with_fixed("status_update_ok", "N")
            .with_fixed("offline_ok", "N")
            .with_fixed("timeout_period", "100")
            .with_fixed("retries_allowed", "003")
            .with_fixed("date_time", "20260831    120000")
            .with_fixed("protocol_version", "2.00")
            .with_field("AO", self.institution.clone())
            .with_field("AM", "Mock Library"))
    }

    fn patron_info(&mut self, barcode: &str) -> Result<Message> {
        let mut log = self.log.lock().expect("call log poisoned");
        log.patron_info += 1;
        log.barcodes.push(barcode.to_string());
        Ok(Message::new("64")
            .with_fixed("patron_status", " ".repeat(14))
            .with_fixed("language", "000")
            .with_fixed("date_time", "20260831    120000")
            .with_fixed("hold_items_count", "0000")
            .with_fixed("overdue_items_count", "0000")
            .with_fixed("charged_items_count", "0000")
            .with_fixed("fine_items_count", "0000")
            .with_fixed("recall_items_count", "0000")
            .with_fixed("unavailable_holds_count", "0000")
            .with_field("AO", self.institution.clone())
            .with_field("AA", barcode)
            .with_field("AE", "Mock Patron"))
    }
}
