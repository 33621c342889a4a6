//! Transfer orchestrator for one album.
//!
//! Ensures the destination folders, fetches the album's photos, assigns
//! naming keys and uploads each photo by reference. Item failures are
//! recorded and the batch moves on; only listing failures and unusable
//! folders stop it.

use albumshift_disk::{join_path, sanitize_segment};
use albumshift_source::AlbumDescriptor;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::TransferError;
use crate::naming::{NamedPhoto, assign_keys};
use crate::outcome_log::write_log;
use crate::source::PhotoSource;
use crate::store::DestinationStore;
use crate::types::{
    BatchState, ItemReport, ItemStatus, TransferConfig, TransferEvent, TransferOutcome,
    TransferSummary,
};

/// Drives one album through naming and upload.
pub struct TransferOrchestrator {
    events_tx: mpsc::UnboundedSender<TransferEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<TransferEvent>>,
}

impl Default for TransferOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferOrchestrator {
    /// Creates a new orchestrator.
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Takes the event receiver. Can only be called once.
    ///
    /// Events are only sent after this call; earlier runs emit nothing.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<TransferEvent>> {
        self.events_rx.take()
    }

    /// Transfers one album into `config.destination_folder/<album title>`.
    ///
    /// Steps run strictly in sequence:
    /// 1. ensure the destination root (created only if absent)
    /// 2. ensure the album folder
    /// 3. list the album's photos, at most `config.page_size`
    /// 4. assign naming keys
    /// 5. per item: validate the source URL, then upload with overwrite
    /// 6. write the outcome log and report the summary
    ///
    /// Nothing is retried. Skipped items are reported but kept out of the log.
    pub async fn run(
        &self,
        source: &dyn PhotoSource,
        store: &dyn DestinationStore,
        album: &AlbumDescriptor,
        config: &TransferConfig,
    ) -> Result<TransferSummary, TransferError> {
        self.set_state(BatchState::NotStarted);

        ensure_root(store, &config.destination_folder).await?;
        let album_folder = join_path(&config.destination_folder, &sanitize_segment(&album.title));
        prepare_folder(store, &album_folder).await?;
        self.set_state(BatchState::FoldersEnsured);

        let records = source.list_photos(album.id, config.page_size).await?;
        info!(album = %album.title, count = records.len(), "photos fetched");
        self.set_state(BatchState::RecordsFetched);

        let named = assign_keys(&records);
        self.set_state(BatchState::KeysAssigned);

        let total = named.len();
        let mut items = Vec::with_capacity(total);
        let mut outcomes = Vec::with_capacity(total);

        for (index, photo) in named.iter().enumerate() {
            self.set_state(BatchState::Uploading { index, total });

            let report = transfer_one(store, &album_folder, photo).await;
            if !matches!(report.status, ItemStatus::Skipped { .. }) {
                outcomes.push(TransferOutcome {
                    file_name: report.file_name.clone(),
                    size_variant_tag: photo.record.size_variant_tag.clone(),
                });
            }

            self.emit(TransferEvent::Item {
                index,
                total,
                report: report.clone(),
            });
            items.push(report);
        }

        let (log_path, log_error) = match &config.log_path {
            Some(path) => match write_log(path, &outcomes).await {
                Ok(()) => {
                    info!(path = %path.display(), entries = outcomes.len(), "outcome log written");
                    (Some(path.clone()), None)
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "failed to write outcome log");
                    (None, Some(e.to_string()))
                }
            },
            None => (None, None),
        };
        self.set_state(BatchState::LogPersisted);

        let summary = TransferSummary {
            album_title: album.title.clone(),
            album_folder,
            items,
            outcomes,
            log_path,
            log_error,
        };

        info!(
            album = %summary.album_title,
            uploaded = summary.uploaded(),
            failed = summary.failed(),
            skipped = summary.skipped(),
            "transfer completed"
        );

        self.set_state(BatchState::Done);
        self.emit(TransferEvent::Completed {
            summary: summary.clone(),
        });

        Ok(summary)
    }

    fn set_state(&self, state: BatchState) {
        debug!(?state, "batch state");
        self.emit(TransferEvent::State(state));
    }

    /// Sends only once the receiver has been taken; a dropped receiver is fine.
    fn emit(&self, event: TransferEvent) {
        if self.events_rx.is_some() {
            return;
        }
        let _ = self.events_tx.send(event);
    }
}

/// Creates the destination root only when it is not already there.
async fn ensure_root(store: &dyn DestinationStore, path: &str) -> Result<(), TransferError> {
    match store.folder_exists(path).await {
        Ok(true) => {
            debug!(path, "destination folder exists");
            return Ok(());
        }
        Ok(false) => info!(path, "destination folder missing, creating it"),
        Err(e) => warn!(path, error = %e, "could not check destination folder"),
    }
    prepare_folder(store, path).await
}

/// Creates a folder. On failure the folder is still accepted if it exists.
async fn prepare_folder(store: &dyn DestinationStore, path: &str) -> Result<(), TransferError> {
    let err = match store.ensure_folder(path).await {
        Ok(status) => {
            debug!(path, ?status, "folder ready");
            return Ok(());
        }
        Err(e) => e,
    };

    warn!(path, error = %err, "folder creation failed");
    match store.folder_exists(path).await {
        Ok(true) => {
            info!(path, "folder confirmed usable");
            Ok(())
        }
        _ => Err(err),
    }
}

/// Validates and uploads one photo. Never fails the batch.
async fn transfer_one(
    store: &dyn DestinationStore,
    folder: &str,
    photo: &NamedPhoto,
) -> ItemReport {
    let file_name = photo.key.file_name();
    let source_url = photo.record.asset_url.clone();

    if !store.validate_source(&source_url).await {
        warn!(file = %file_name, "source URL failed validation, upload skipped");
        return ItemReport {
            file_name,
            status: ItemStatus::Skipped {
                reason: TransferError::SourceAssetUnreachable(source_url.clone()).to_string(),
            },
            source_url,
        };
    }

    let path = join_path(folder, &file_name);
    let status = match store.upload_by_reference(&path, &source_url, true).await {
        Ok(()) => ItemStatus::Uploaded,
        Err(e) => {
            warn!(file = %file_name, error = %e, "upload failed");
            ItemStatus::UploadFailed {
                reason: e.to_string(),
            }
        }
    };

    ItemReport {
        file_name,
        source_url,
        status,
    }
}
