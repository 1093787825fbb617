//! Resolution of run settings from flags, config file and defaults.
//!
//! Precedence is command line, then config file, then built-in defaults.

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::Duration;
use subgraph_config::{find_config, load_config, DocsConfig};
use subgraph_ipfs::{IpfsClient, DEFAULT_GATEWAY};
use subgraph_markdown::DEFAULT_TITLE;
use thiserror::Error;

/// Default timeout in seconds for schema downloads.
const DEFAULT_TIMEOUT: u64 = 30;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid header format: '{0}'. Expected 'Header-Name: Header-Value'")]
    InvalidHeader(String),

    #[error("Header name cannot be empty")]
    EmptyHeaderName,

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid protocol name '{0}': must be non-empty and contain no path separators")]
    InvalidProtocol(String),

    #[error("Timeout must be at least 1 second")]
    ZeroTimeout,
}

/// Values given on the command line. `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub gateway: Option<String>,
    pub headers: Vec<String>,
    pub timeout: Option<u64>,
    pub retry: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub title: Option<String>,
    pub no_proxy: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub gateway: String,
    pub headers: Vec<(String, String)>,
    pub timeout: u64,
    pub retry: u32,
    pub output_dir: PathBuf,
    pub title: String,
    pub system_proxy: bool,
}

impl Settings {
    /// Gateway client configured from these settings.
    pub fn client(&self) -> IpfsClient {
        IpfsClient::new()
            .with_gateway(&self.gateway)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_retries(self.retry)
            .with_headers(self.headers.iter().cloned())
            .with_system_proxy(self.system_proxy)
    }
}

/// Loads the config file named on the command line, or the nearest one found
/// walking up from `start_dir`. No file at all is not an error.
///
/// A relative `outputDir` is resolved against the config file's directory.
pub fn load_config_file(
    explicit: Option<&Path>,
    start_dir: &Path,
) -> anyhow::Result<Option<DocsConfig>> {
    let path = if let Some(path) = explicit {
        if !path.is_file() {
            return Err(SettingsError::ConfigNotFound(path.to_path_buf()).into());
        }
        path.to_path_buf()
    } else {
        match find_config(start_dir).context("Failed to search for config")? {
            Some(path) => path,
            None => {
                tracing::debug!("No config file, using defaults");
                return Ok(None);
            }
        }
    };

    let mut config = load_config(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    if let Some(base) = path.parent() {
        config.output_dir = config.output_dir.map(|dir| base.join(dir));
    }
    Ok(Some(config))
}

/// Parses a header string in "Name: Value" format.
fn parse_header(header: &str) -> Result<(String, String), SettingsError> {
    let (name, value) = header
        .split_once(':')
        .ok_or_else(|| SettingsError::InvalidHeader(header.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(SettingsError::EmptyHeaderName);
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Merges command-line overrides over `config` over defaults.
pub fn resolve_settings(
    overrides: &Overrides,
    config: Option<&DocsConfig>,
) -> Result<Settings, SettingsError> {
    let fallback = DocsConfig::default();
    let config = config.unwrap_or(&fallback);

    let mut headers = config.header_pairs();
    for raw in &overrides.headers {
        let (name, value) = parse_header(raw)?;
        // Replace a config header with the same name (case-insensitive)
        headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }

    let timeout = overrides
        .timeout
        .or(config.timeout)
        .unwrap_or(DEFAULT_TIMEOUT);
    if timeout == 0 {
        return Err(SettingsError::ZeroTimeout);
    }

    Ok(Settings {
        gateway: overrides
            .gateway
            .clone()
            .or_else(|| config.gateway.clone())
            .unwrap_or_else(|| DEFAULT_GATEWAY.to_string()),
        headers,
        timeout,
        retry: overrides.retry.or(config.retry).unwrap_or(0),
        output_dir: overrides
            .output_dir
            .clone()
            .or_else(|| config.output_dir.clone())
            .unwrap_or_default(),
        title: overrides
            .title
            .clone()
            .or_else(|| config.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        system_proxy: !overrides.no_proxy,
    })
}

/// `<protocol>_Subgraph_Entities.md`, after checking the protocol name is
/// usable as a file name.
pub fn output_file_name(protocol: &str) -> Result<String, SettingsError> {
    if protocol.trim().is_empty() || protocol.contains(['/', '\\']) || protocol == ".." {
        return Err(SettingsError::InvalidProtocol(protocol.to_string()));
    }
    Ok(format!("{protocol}_Subgraph_Entities.md"))
}
