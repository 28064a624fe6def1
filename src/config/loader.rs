//! Tolerant config file loading.
//!
//! A missing or unparsable file is not fatal: the shell is still useful for
//! `help`/`echo` and the operator sees the problem as soon as a network
//! command needs a value that is empty. Problems are logged via tracing
//! rather than printed into the prompt stream.

use std::fs;
use std::path::Path;

use crate::config::schema::{ConfigFile, SessionConfig};

/// Load the `[client]` section from the given path.
///
/// Returns an all-empty [`SessionConfig`] when the file is missing or does
/// not parse; a missing file is logged at debug, a parse failure at warn.
pub fn load_session_config(path: &Path) -> SessionConfig {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            // Running without a config file is normal for help/echo use.
            tracing::debug!("config file {} not readable: {}", path.display(), e);
            return SessionConfig::default();
        }
    };

    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => file.client,
        Err(e) => {
            tracing::warn!("config file {} did not parse: {}", path.display(), e);
            SessionConfig::default()
        }
    }
}
