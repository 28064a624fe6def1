//! Configuration loading and schema.
//!
//! Bootstrap parameters come from two places: process flags (parsed in
//! [`crate::cli`]) and a TOML config file with a `[client]` section. The
//! merged result is a [`SessionConfig`], resolved once before the line loop
//! starts and read-only from then on.
//!
//! # Architecture
//!
//! - [`schema`] - Serde-derived config file structure
//! - [`loader`] - Tolerant file loading

pub mod loader;
pub mod schema;

pub use loader::load_session_config;
pub use schema::SessionConfig;
