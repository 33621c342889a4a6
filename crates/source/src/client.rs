//! VK API client.
//!
//! Async HTTP client using `reqwest`. The access token and API version travel
//! as query parameters on every call, the way the VK method API expects them.

use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::types::{
    AlbumDescriptor, ApiEnvelope, ItemList, PROFILE_ALBUM_ID, PhotoRecord, RawAlbum, RawPhoto,
    UserInfo,
};

const DEFAULT_BASE_URL: &str = "https://api.vk.com/method";
const DEFAULT_API_VERSION: &str = "5.131";
const DEFAULT_SIZE_VARIANT: &str = "w";

const WALL_ALBUM_ID: i64 = -7;
const SAVED_ALBUM_ID: i64 = -15;

/// Errors from the VK client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Logical error reported inside a 200 response body.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid access token")]
    InvalidToken,
}

/// Connection settings for the VK API.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub access_token: String,
    /// Account whose albums are read (numeric id or screen name).
    pub owner_id: String,
    pub api_version: String,
    pub base_url: String,
    /// Size variant tag kept for each photo (`"w"` is the largest).
    pub size_variant: String,
}

impl SourceConfig {
    /// Creates a config with default endpoint, API version and size variant.
    pub fn new(access_token: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            owner_id: owner_id.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            size_variant: DEFAULT_SIZE_VARIANT.to_string(),
        }
    }
}

/// VK API client.
///
/// The album list is fetched at most once per client and served from memory
/// afterwards.
pub struct Client {
    http: reqwest::Client,
    config: SourceConfig,
    albums: OnceCell<Vec<AlbumDescriptor>>,
}

impl Client {
    /// Creates a new client from an explicit configuration.
    pub fn new(config: SourceConfig) -> Result<Self, Error> {
        if config.access_token.is_empty() {
            return Err(Error::InvalidToken);
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            config,
            albums: OnceCell::new(),
        })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Calls a VK method and unwraps the `response` payload.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), method);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("access_token", self.config.access_token.as_str()),
                ("v", self.config.api_version.as_str()),
            ])
            .query(params)
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&body)?;

        if let Some(err) = envelope.error {
            return Err(Error::Api {
                code: err.error_code,
                message: err.error_msg,
            });
        }

        envelope.response.ok_or_else(|| Error::Api {
            code: 0,
            message: format!("{method}: response field missing"),
        })
    }

    /// Lists the owner's albums, system albums included.
    ///
    /// The first successful listing is cached; later calls return a copy
    /// without touching the network.
    pub async fn list_albums(&self) -> Result<Vec<AlbumDescriptor>, Error> {
        let albums = self
            .albums
            .get_or_try_init(|| self.fetch_albums())
            .await?;
        Ok(albums.clone())
    }

    async fn fetch_albums(&self) -> Result<Vec<AlbumDescriptor>, Error> {
        debug!(owner = %self.config.owner_id, "fetching album list");
        let list: ItemList<RawAlbum> = self
            .call(
                "photos.getAlbums",
                &[
                    ("owner_id", self.config.owner_id.clone()),
                    ("need_system", "1".into()),
                ],
            )
            .await?;

        let albums: Vec<AlbumDescriptor> =
            list.items.into_iter().map(AlbumDescriptor::from).collect();
        info!(owner = %self.config.owner_id, count = albums.len(), "album list fetched");
        Ok(albums)
    }

    /// Lists up to `limit` photos of one album.
    ///
    /// Entries lacking the configured size variant are dropped.
    pub async fn list_photos(&self, album_id: i64, limit: u32) -> Result<Vec<PhotoRecord>, Error> {
        let list: ItemList<RawPhoto> = self
            .call(
                "photos.get",
                &[
                    ("owner_id", self.config.owner_id.clone()),
                    ("album_id", album_param(album_id)),
                    ("count", limit.to_string()),
                    ("extended", "1".into()),
                ],
            )
            .await?;

        let fetched = list.items.len();
        let records: Vec<PhotoRecord> = list
            .items
            .into_iter()
            .filter_map(|raw| raw.into_record(&self.config.size_variant))
            .collect();

        if records.len() < fetched {
            warn!(
                album_id,
                dropped = fetched - records.len(),
                variant = %self.config.size_variant,
                "photos without the requested size variant skipped"
            );
        }
        debug!(album_id, count = records.len(), "photos fetched");

        Ok(records)
    }

    /// Resolves the configured owner to a user profile.
    pub async fn user_info(&self) -> Result<UserInfo, Error> {
        let users: Vec<UserInfo> = self
            .call("users.get", &[("user_ids", self.config.owner_id.clone())])
            .await?;

        users.into_iter().next().ok_or_else(|| Error::Api {
            code: 0,
            message: format!("user {} not found", self.config.owner_id),
        })
    }
}

/// Maps reserved system album ids to the names `photos.get` accepts.
fn album_param(album_id: i64) -> String {
    match album_id {
        PROFILE_ALBUM_ID => "profile".into(),
        WALL_ALBUM_ID => "wall".into(),
        SAVED_ALBUM_ID => "saved".into(),
        id => id.to_string(),
    }
}
