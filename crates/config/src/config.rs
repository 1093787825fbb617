use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Settings read from a `.subgraphdocsrc` file.
///
/// Every key is optional; command-line flags take precedence over whatever is
/// set here, and built-in defaults fill the rest.
///
/// ```yaml
/// gateway: cloudflare-ipfs.com
/// timeout: 60
/// retry: 2
/// outputDir: docs/subgraphs
/// title: Subgraph Entities
/// headers:
///   Authorization: Bearer my-token
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocsConfig {
    /// IPFS gateway host, optionally with scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    /// Download timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Retry attempts for failed downloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,

    /// Extra HTTP headers sent to the gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Directory the generated Markdown is written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Top-level heading of the generated page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DocsConfig {
    /// Configured headers as owned pairs, sorted by name.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .flatten()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}
