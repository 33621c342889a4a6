//! Album and photo types, plus the raw VK payload shapes they come from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Album id VK reserves for the "profile photos" system album.
pub const PROFILE_ALBUM_ID: i64 = -6;

/// An album as listed by `photos.getAlbums`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDescriptor {
    pub id: i64,
    pub title: String,
}

impl AlbumDescriptor {
    /// Returns true for the profile photos pseudo-album.
    pub fn is_profile(&self) -> bool {
        self.id == PROFILE_ALBUM_ID
    }
}

/// One photo, normalized to a single size variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    /// Likes count. Comparable across photos of the same album.
    pub popularity_count: u64,
    pub captured_at: DateTime<Utc>,
    pub asset_url: String,
    /// Which size variant `asset_url` points to. Diagnostic only.
    pub size_variant_tag: String,
}

/// Owner account as returned by `users.get`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UserInfo {
    /// "First Last", or the numeric id when the profile hides both names.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            format!("id{}", self.id)
        } else {
            name.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Raw payloads (internal).
// ---------------------------------------------------------------------------

/// Every VK method answers with either `response` or `error`, always as HTTP 200.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub response: Option<T>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemList<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAlbum {
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

impl From<RawAlbum> for AlbumDescriptor {
    fn from(raw: RawAlbum) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPhoto {
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub likes: Option<RawLikes>,
    #[serde(default)]
    pub sizes: Vec<RawSize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLikes {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSize {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl RawPhoto {
    /// Normalizes the raw entry, keeping only the `variant` size.
    ///
    /// Returns `None` when the variant is missing or the timestamp is out of range.
    pub(crate) fn into_record(self, variant: &str) -> Option<PhotoRecord> {
        let size = self.sizes.into_iter().find(|s| s.kind == variant)?;
        let captured_at = DateTime::from_timestamp(self.date, 0)?;
        Some(PhotoRecord {
            popularity_count: self.likes.map(|l| l.count).unwrap_or(0),
            captured_at,
            asset_url: size.url,
            size_variant_tag: size.kind,
        })
    }
}
