//! Configuration for subgraph-docs.
//!
//! A config file is optional. When present it supplies gateway, download and
//! output defaults so they don't have to be repeated on every invocation.

mod config;
mod error;
mod loader;

pub use config::DocsConfig;
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
