//! Yandex Disk REST client.
//!
//! Async HTTP client using `reqwest` with `OAuth` token authentication.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

const DEFAULT_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk";

/// Errors from the disk client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("destination error {status}: {body}")]
    Destination { status: u16, body: String },

    #[error("invalid OAuth token")]
    InvalidToken,
}

/// Connection settings for the disk API.
#[derive(Debug, Clone)]
pub struct DiskConfig {
    pub token: String,
    pub base_url: String,
}

impl DiskConfig {
    /// Creates a config pointing at the public Yandex Disk API.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Result of an idempotent folder creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    Created,
    AlreadyExists,
}

/// Yandex Disk API client.
pub struct Client {
    http: reqwest::Client,
    /// Unauthenticated client for probing source URLs, so the disk token never
    /// leaves for third-party hosts.
    probe: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a new client from an explicit configuration.
    pub fn new(config: DiskConfig) -> Result<Self, Error> {
        if config.token.is_empty() {
            return Err(Error::InvalidToken);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("OAuth {}", config.token))
                .map_err(|_| Error::InvalidToken)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        let probe = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            probe,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn resources_url(&self) -> String {
        format!("{}/resources", self.base_url)
    }

    /// Creates a folder; an existing folder counts as success.
    pub async fn ensure_folder(&self, path: &str) -> Result<FolderStatus, Error> {
        let resp = self
            .http
            .put(self.resources_url())
            .query(&[("path", path)])
            .send()
            .await?;

        match resp.status() {
            StatusCode::CREATED => {
                info!(path, "folder created");
                Ok(FolderStatus::Created)
            }
            StatusCode::CONFLICT => {
                debug!(path, "folder already exists");
                Ok(FolderStatus::AlreadyExists)
            }
            status => Err(destination_error(status, resp).await),
        }
    }

    /// Returns whether a folder exists. "Not found" is a plain `false`.
    pub async fn folder_exists(&self, path: &str) -> Result<bool, Error> {
        let resp = self
            .http
            .get(self.resources_url())
            .query(&[("path", path)])
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(destination_error(status, resp).await),
        }
    }

    /// Probes a source URL with `HEAD`, without transferring the body.
    ///
    /// Any non-200 answer or transport fault yields `false`.
    pub async fn validate_source(&self, url: &str) -> bool {
        match self.probe.head(url).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => true,
            Ok(resp) => {
                warn!(url, status = resp.status().as_u16(), "source URL probe failed");
                false
            }
            Err(e) => {
                warn!(url, error = %e, "source URL unreachable");
                false
            }
        }
    }

    /// Asks the disk to fetch `source_url` and store it at `path`.
    ///
    /// Succeeds on `202 Accepted`; the disk completes the download on its own.
    pub async fn upload_by_reference(
        &self,
        path: &str,
        source_url: &str,
        overwrite: bool,
    ) -> Result<(), Error> {
        let overwrite = if overwrite { "true" } else { "false" };
        let resp = self
            .http
            .post(format!("{}/upload", self.resources_url()))
            .query(&[("path", path), ("url", source_url), ("overwrite", overwrite)])
            .send()
            .await?;

        match resp.status() {
            StatusCode::ACCEPTED => {
                debug!(path, "upload accepted");
                Ok(())
            }
            status => Err(destination_error(status, resp).await),
        }
    }
}

async fn destination_error(status: StatusCode, resp: reqwest::Response) -> Error {
    let body = resp.text().await.unwrap_or_default();
    Error::Destination {
        status: status.as_u16(),
        body,
    }
}
