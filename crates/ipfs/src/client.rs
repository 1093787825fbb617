//! Configurable IPFS gateway client.
//!
//! Subgraph manifests reference their schema by content identifier (CID).
//! The client resolves a CID against an HTTP gateway and downloads the file
//! as text, with optional headers, timeouts and retries.

use crate::{FetchError, Result};
use std::collections::HashMap;
use std::time::Duration;

/// Gateway used when none is configured.
pub const DEFAULT_GATEWAY: &str = "ipfs.io";

/// Default timeout for a schema download (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default number of retry attempts.
const DEFAULT_RETRIES: u32 = 0;

/// Backoff stops doubling after this many retries.
const MAX_BACKOFF_SHIFT: u32 = 6;

/// A configurable client for downloading files from an IPFS HTTP gateway.
///
/// # Examples
///
/// ```no_run
/// use subgraph_ipfs::IpfsClient;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IpfsClient::new()
///     .with_gateway("cloudflare-ipfs.com")
///     .with_timeout(Duration::from_secs(60))
///     .with_retries(2);
/// let sdl = client.fetch("QmSchemaCid").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IpfsClient {
    gateway: String,
    headers: HashMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
    retries: u32,
    system_proxy: bool,
}

impl Default for IpfsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IpfsClient {
    /// Creates a client for the public `ipfs.io` gateway.
    ///
    /// Default settings:
    /// - 30 second request timeout
    /// - 10 second connection timeout
    /// - No retries
    /// - No custom headers
    #[must_use]
    pub fn new() -> Self {
        Self {
            gateway: DEFAULT_GATEWAY.to_string(),
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            system_proxy: true,
        }
    }

    /// Sets the gateway host. A bare host gets `https://`; an explicit
    /// `http://` or `https://` scheme is kept as given.
    #[must_use]
    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = gateway.into();
        self
    }

    /// Adds a custom HTTP header, e.g. an auth token for a private gateway.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the request timeout (connection + transfer).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the number of retry attempts on failure.
    ///
    /// Retries use exponential backoff starting at 1 second.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Whether to honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    /// Enabled by default.
    #[must_use]
    pub fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    #[must_use]
    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    /// Builds the gateway URL for `cid`: `https://<gateway>/ipfs/<cid>`.
    pub fn locator(&self, cid: &str) -> Result<String> {
        let cid = cid.trim();
        if cid.is_empty() {
            return Err(FetchError::InvalidLocator("CID is empty".to_string()));
        }
        if cid.chars().any(char::is_whitespace) {
            return Err(FetchError::InvalidLocator(format!(
                "CID '{cid}' contains whitespace"
            )));
        }

        let gateway = self.gateway.trim().trim_end_matches('/');
        if gateway.is_empty() {
            return Err(FetchError::InvalidLocator("gateway is empty".to_string()));
        }

        if gateway.starts_with("http://") || gateway.starts_with("https://") {
            Ok(format!("{gateway}/ipfs/{cid}"))
        } else {
            Ok(format!("https://{gateway}/ipfs/{cid}"))
        }
    }

    /// Downloads the file identified by `cid` from the configured gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The CID or gateway cannot form a locator
    /// - The network request fails after all retry attempts
    /// - The gateway returns an HTTP error status
    /// - The body is not valid text
    #[tracing::instrument(skip(self), fields(gateway = %self.gateway))]
    pub async fn fetch(&self, cid: &str) -> Result<String> {
        let url = self.locator(cid)?;
        self.fetch_url(&url).await
    }

    /// Downloads an explicit URL, with the client's retry policy.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_url(&self, url: &str) -> Result<String> {
        let mut last_error = None;
        let attempts = self.retries.saturating_add(1);

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                tracing::info!(
                    attempt,
                    delay_secs = delay.as_secs(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Request failed");
                    let retryable = Self::is_retryable(&e);
                    last_error = Some(e);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::Network("No attempts made".to_string())))
    }

    /// Executes a single download without retry logic.
    async fn fetch_once(&self, url: &str) -> Result<String> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout);
        if !self.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;

        tracing::info!("Requesting schema from gateway");
        let mut request = client.get(url);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(FetchError::Http(status.as_u16(), error_body));
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read response body");
            FetchError::Body(e.to_string())
        })?;

        tracing::info!(bytes = body.len(), "Schema downloaded");
        Ok(body)
    }

    /// Network errors and 5xx responses are retryable. Client errors, bad
    /// locators and unreadable bodies are not.
    fn is_retryable(error: &FetchError) -> bool {
        match error {
            FetchError::Network(_) => true,
            FetchError::Http(status, _) => *status >= 500,
            FetchError::InvalidLocator(_) | FetchError::Body(_) => false,
        }
    }
}

/// Delay before retry `attempt` (1-based): 1s, 2s, 4s, ... capped at 64s.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1 << (attempt - 1).min(MAX_BACKOFF_SHIFT))
}
