//! Geometry fetch backends.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Transport-level fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request could not be sent or the body could not be read
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(String),
}

/// Source of raw geometry documents.
pub trait GeometryFetcher: Send + Sync {
    /// Resolve a catalog endpoint to the location passed to [`fetch`](Self::fetch).
    fn locate(&self, endpoint: &str) -> String;

    /// Read the document at `location`.
    fn fetch(&self, location: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// User-Agent sent with geometry requests.
const USER_AGENT: &str = concat!("cartolayer/", env!("CARGO_PKG_VERSION"));

/// Fetches geometry over HTTP(S) with reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: String,
}

impl HttpFetcher {
    /// Create a fetcher rooted at `base` with a request timeout.
    pub fn new(base: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }
}

impl GeometryFetcher for HttpFetcher {
    fn locate(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base, endpoint.trim_start_matches('/'))
        }
    }

    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        trace!(url = location, "Geometry GET starting");

        let response = self.client.get(location).send().await.map_err(|e| {
            warn!(
                url = location,
                error = %e,
                is_connect = e.is_connect(),
                is_timeout = e.is_timeout(),
                "Geometry request failed"
            );
            FetchError::Http(format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: location.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Http(format!("Failed to read response: {}", e)))?;
        debug!(url = location, bytes = bytes.len(), "Geometry response read");
        Ok(bytes.to_vec())
    }
}

/// Reads geometry documents from a local directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base: PathBuf,
}

impl FileFetcher {
    /// Create a fetcher rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Root directory.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl GeometryFetcher for FileFetcher {
    fn locate(&self, endpoint: &str) -> String {
        self.base.join(endpoint).to_string_lossy().into_owned()
    }

    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        trace!(path = location, "Geometry read starting");
        tokio::fs::read(location)
            .await
            .map_err(|e| FetchError::Io(format!("{}: {}", location, e)))
    }
}

/// Fetcher selected from the configured data base.
///
/// `http://` and `https://` bases use [`HttpFetcher`]; anything else is
/// treated as a directory.
#[derive(Debug, Clone)]
pub enum SourceFetcher {
    Http(HttpFetcher),
    File(FileFetcher),
}

impl SourceFetcher {
    /// Pick the backend for `base`.
    pub fn from_base(base: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        if base.starts_with("http://") || base.starts_with("https://") {
            Ok(Self::Http(HttpFetcher::new(base, timeout_secs)?))
        } else {
            Ok(Self::File(FileFetcher::new(base)))
        }
    }
}

impl GeometryFetcher for SourceFetcher {
    fn locate(&self, endpoint: &str) -> String {
        match self {
            Self::Http(f) => f.locate(endpoint),
            Self::File(f) => f.locate(endpoint),
        }
    }

    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        match self {
            Self::Http(f) => f.fetch(location).await,
            Self::File(f) => f.fetch(location).await,
        }
    }
}
