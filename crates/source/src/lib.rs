//! VK API client for the photo source side of a migration.
//!
//! Lists albums (cached per client), lists photos within an album and
//! normalizes them into [`PhotoRecord`]s carrying one selected size variant.

pub mod client;
pub mod types;

pub use client::{Client, Error, SourceConfig};
pub use types::{AlbumDescriptor, PROFILE_ALBUM_ID, PhotoRecord, UserInfo};
