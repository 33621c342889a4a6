//! Photo source seam.
//!
//! `PhotoSource` is implemented for the VK client here and by in-memory
//! doubles in tests, keeping the orchestrator free of transport details.

use std::future::Future;
use std::pin::Pin;

use albumshift_source::{AlbumDescriptor, PhotoRecord};

use crate::error::TransferError;

/// Read-only view over the albums and photos of one account.
pub trait PhotoSource: Send + Sync {
    /// Lists albums. Repeated calls must not hit the network again.
    fn list_albums(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<AlbumDescriptor>, TransferError>> + Send + '_>>;

    /// Lists up to `limit` normalized photos of one album.
    fn list_photos(
        &self,
        album_id: i64,
        limit: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<PhotoRecord>, TransferError>> + Send + '_>>;
}

impl PhotoSource for albumshift_source::Client {
    fn list_albums(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<AlbumDescriptor>, TransferError>> + Send + '_>>
    {
        Box::pin(async move { Ok(albumshift_source::Client::list_albums(self).await?) })
    }

    fn list_photos(
        &self,
        album_id: i64,
        limit: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<PhotoRecord>, TransferError>> + Send + '_>>
    {
        Box::pin(async move {
            Ok(albumshift_source::Client::list_photos(self, album_id, limit).await?)
        })
    }
}
