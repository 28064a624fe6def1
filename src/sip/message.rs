//! SIP2 wire frames.
//!
//! A frame is ASCII, terminated by `\r`: a 2-digit message code, a run of
//! fixed-width fields whose layout depends on the code, then `|`-delimited
//! variable fields introduced by 2-letter codes. Checksums and sequence
//! numbers are not used.
//!
//! Responses expose lookup-by-name over their fixed fields, which is how the
//! dispatcher reads `online_status` out of a 98 ACS Status.

use std::fmt;

use crate::error::{Result, SipshError};

/// Frame terminator.
pub const TERMINATOR: char = '\r';

/// A named fixed-width field slot in a message layout.
#[derive(Debug, Clone, Copy)]
struct FixedSpec {
    name: &'static str,
    len: usize,
}

const fn spec(name: &'static str, len: usize) -> FixedSpec {
    FixedSpec { name, len }
}

/// 94 Login Response.
const LOGIN_RESPONSE: &[FixedSpec] = &[spec("ok", 1)];

/// 98 ACS Status.
const ACS_STATUS: &[FixedSpec] = &[
    spec("online_status", 1),
    spec("checkin_ok", 1),
    spec("checkout_ok", 1),
    spec("acs_renewal_policy", 1),
    spec("status_update_ok", 1),
    spec("offline_ok", 1),
    spec("timeout_period", 3),
    spec("retries_allowed", 3),
    spec("date_time", 18),
    spec("protocol_version", 4),
];

/// 64 Patron Information Response.
const PATRON_INFO_RESPONSE: &[FixedSpec] = &[
    spec("patron_status", 14),
    spec("language", 3),
    spec("date_time", 18),
    spec("hold_items_count", 4),
    spec("overdue_items_count", 4),
    spec("charged_items_count", 4),
    spec("fine_items_count", 4),
    spec("recall_items_count", 4),
    spec("unavailable_holds_count", 4),
];

fn layout_for(code: &str) -> &'static [FixedSpec] {
    match code {
        "94" => LOGIN_RESPONSE,
        "98" => ACS_STATUS,
        "64" => PATRON_INFO_RESPONSE,
        _ => &[],
    }
}

/// A fixed-width field with its layout name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedField {
    pub name: &'static str,
    pub value: String,
}

/// A `|`-delimited variable field with its 2-letter code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub code: String,
    pub value: String,
}

/// One SIP2 message, request or response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    code: String,
    fixed: Vec<FixedField>,
    fields: Vec<Field>,
}

impl Message {
    /// Start a message with the given 2-digit code.
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            fixed: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Append a fixed-width field. Order of calls is wire order.
    pub fn with_fixed(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fixed.push(FixedField {
            name,
            value: value.into(),
        });
        self
    }

    /// Append a variable field.
    pub fn with_field(mut self, code: &str, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            code: code.to_string(),
            value: value.into(),
        });
        self
    }

    /// The 2-digit message code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Look up a fixed field by its layout name.
    pub fn fixed_field(&self, name: &str) -> Option<&str> {
        self.fixed
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Look up the first variable field with the given code.
    pub fn field(&self, code: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.code == code)
            .map(|f| f.value.as_str())
    }

    /// Render the frame, without the terminator.
    pub fn encode(&self) -> String {
        let mut out = self.code.clone();
        for f in &self.fixed {
            out.push_str(&f.value);
        }
        for f in &self.fields {
            out.push_str(&f.code);
            out.push_str(&f.value);
            out.push('|');
        }
        out
    }

    /// Parse a received frame (terminator already stripped).
    ///
    /// Fixed fields are cut to the layout registered for the message code;
    /// an unknown code parses with variable fields only. The frame must be
    /// long enough to cover the whole fixed layout.
    pub fn parse(frame: &str) -> Result<Self> {
        let code = frame.get(..2).ok_or_else(|| SipshError::MalformedResponse {
            message: format!("frame too short: {:?}", frame),
        })?;

        let mut message = Self::new(code);
        let mut rest = &frame[2..];

        for spec in layout_for(code) {
            let value = rest
                .get(..spec.len)
                .ok_or_else(|| SipshError::MalformedResponse {
                    message: format!("{} frame truncated in fixed field '{}'", code, spec.name),
                })?;
            message.fixed.push(FixedField {
                name: spec.name,
                value: value.to_string(),
            });
            rest = &rest[spec.len..];
        }

        for part in rest.split('|').filter(|p| !p.is_empty()) {
            let field_code = part.get(..2).ok_or_else(|| SipshError::MalformedResponse {
                message: format!("{} frame has a malformed variable field: {:?}", code, part),
            })?;
            message.fields.push(Field {
                code: field_code.to_string(),
                value: part[2..].to_string(),
            });
        }

        Ok(message)
    }
}

/// Operator-facing rendering: one line per field, fixed fields by name,
/// variable fields by code.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        for field in &self.fixed {
            write!(f, "\n  {}: {}", field.name, field.value)?;
        }
        for field in &self.fields {
            write!(f, "\n  {}: {}", field.code, field.value)?;
        }
        Ok(())
    }
}
