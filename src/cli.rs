//! CLI argument definitions.
//!
//! This module defines the process-level flags using clap's derive macros.
//! The interactive command surface (`help`, `connect`, ...) lives in
//! [`crate::dispatcher`]; only bootstrap options are parsed here.
//!
//! clap exits with code 2 on an unrecognized option and 0 for `--help`,
//! which is exactly the bootstrap contract sipsh wants.

use clap::Parser;
use std::path::PathBuf;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sipsh.toml";

/// sipsh - Interactive SIP2 client shell.
#[derive(Debug, Parser)]
#[command(name = "sipsh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides the default ./sipsh.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Automatically connect, login, and send a status request on startup
    #[arg(short, long)]
    pub autostart: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// The config file path to load, falling back to the default.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
