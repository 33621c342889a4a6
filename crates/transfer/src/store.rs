//! Destination store seam.

use std::future::Future;
use std::pin::Pin;

use albumshift_disk::FolderStatus;

use crate::error::TransferError;

/// Remote hierarchical storage receiving the photos.
pub trait DestinationStore: Send + Sync {
    /// Creates a folder; an existing folder is not an error.
    fn ensure_folder<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<FolderStatus, TransferError>> + Send + 'a>>;

    /// Returns whether a folder exists.
    fn folder_exists<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, TransferError>> + Send + 'a>>;

    /// Probes a source URL. Never fails; an unusable URL is `false`.
    fn validate_source<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;

    /// Has the store fetch `source_url` into `path`.
    fn upload_by_reference<'a>(
        &'a self,
        path: &'a str,
        source_url: &'a str,
        overwrite: bool,
    ) -> Pin<Box<dyn Future<Output = Result<(), TransferError>> + Send + 'a>>;
}

impl DestinationStore for albumshift_disk::Client {
    fn ensure_folder<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<FolderStatus, TransferError>> + Send + 'a>> {
        Box::pin(async move { Ok(albumshift_disk::Client::ensure_folder(self, path).await?) })
    }

    fn folder_exists<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, TransferError>> + Send + 'a>> {
        Box::pin(async move { Ok(albumshift_disk::Client::folder_exists(self, path).await?) })
    }

    fn validate_source<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(albumshift_disk::Client::validate_source(self, url))
    }

    fn upload_by_reference<'a>(
        &'a self,
        path: &'a str,
        source_url: &'a str,
        overwrite: bool,
    ) -> Pin<Box<dyn Future<Output = Result<(), TransferError>> + Send + 'a>> {
        Box::pin(async move {
            Ok(albumshift_disk::Client::upload_by_reference(self, path, source_url, overwrite)
                .await?)
        })
    }
}
