//! HTTP client for the gallery listing service.
//!
//! One endpoint: GET `{base}/service[/path]` returning a JSON [`Listing`].
//! The view-model talks to the transport through the [`ListingFetcher`] trait
//! so tests can substitute a mock without a running backend.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::models::Listing;

/// Failures of a single listing fetch. The view-model folds all of these
/// into one user-visible notification; variants exist for logging.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("listing request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("listing service returned {status}")]
    Status { status: StatusCode },
    #[error("malformed listing payload: {0}")]
    Payload(#[source] reqwest::Error),
}

/// Object-safe seam between the view-model and the HTTP transport.
#[async_trait]
pub trait ListingFetcher {
    /// Fetches and decodes the listing at `url`.
    async fn fetch(&self, url: &str) -> Result<Listing, ClientError>;
}

/// Production fetcher backed by a shared `reqwest` client.
pub struct ListingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ListingClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Listing endpoint under the configured base URL, optionally narrowed
    /// to a gallery sub-path.
    pub fn service_url(&self, path: Option<&str>) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        match path {
            Some(p) => format!("{}/service/{}", base, p.trim_start_matches('/')),
            None => format!("{}/service", base),
        }
    }
}

#[async_trait]
impl ListingFetcher for ListingClient {
    async fn fetch(&self, url: &str) -> Result<Listing, ClientError> {
        debug!("Fetching listing from {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Listing service returned {} for {}", status, url);
            return Err(ClientError::Status { status });
        }

        response.json::<Listing>().await.map_err(ClientError::Payload)
    }
}
