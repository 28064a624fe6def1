//! Config file structure.
//!
//! The file is TOML with one recognized section:
//!
//! ```toml
//! [client]
//! server = "sip.example.org"
//! port = "6001"
//! institution = "main"
//! username = "sip-user"
//! password = "sip-pass"
//! location_code = "circ-desk"
//! ```
//!
//! Every field defaults to empty when missing or malformed; handlers that
//! need a value fail gracefully when it is empty. Semantic validation is
//! deliberately not the loader's job.

use serde::Deserialize;

/// Top-level config file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// The `[client]` section.
    #[serde(default)]
    pub client: SessionConfig,
}

/// Connection and credential settings for one SIP server session.
///
/// The port is kept as a string and parsed at connect time; a malformed
/// port is reported as an ordinary connect failure rather than a config
/// error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// SIP server hostname or address.
    pub server: String,

    /// SIP server TCP port.
    pub port: String,

    /// Institution code scoping requests to an organizational context.
    pub institution: String,

    /// Username for the 93 Login request.
    pub username: String,

    /// Password for the 93 Login request.
    pub password: String,

    /// Location code for the 93 Login request.
    pub location_code: String,

    /// Include the underlying cause in the operator-facing connect-failure
    /// message. Off by default: the generic message avoids leaking internal
    /// errors, matching the historical behavior; the cause is always logged
    /// at debug level either way.
    pub verbose_connect_errors: bool,
}
