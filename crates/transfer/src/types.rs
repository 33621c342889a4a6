//! Data types for the transfer flow.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default root folder on the disk.
pub const DEFAULT_DESTINATION_FOLDER: &str = "PublicFolder";

/// Default number of photos fetched per album.
///
/// Kept small: the disk may accept fewer files than requested when the
/// source photos were uploaded at the same moment without metadata.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Default outcome log file name.
pub const DEFAULT_LOG_FILE: &str = "OUT_logs.json";

/// Settings for one transfer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    /// Root folder on the disk; each album gets a subfolder.
    pub destination_folder: String,
    /// Maximum number of photos fetched from the album.
    pub page_size: u32,
    /// Where the outcome log is written. `None` disables the log.
    pub log_path: Option<PathBuf>,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            destination_folder: DEFAULT_DESTINATION_FOLDER.into(),
            page_size: DEFAULT_PAGE_SIZE,
            log_path: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

/// One persisted log entry per attempted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutcome {
    pub file_name: String,
    #[serde(rename = "size_type")]
    pub size_variant_tag: String,
}

/// How one item of a batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// The disk accepted the upload.
    Uploaded,
    /// The upload call was made and rejected.
    UploadFailed { reason: String },
    /// The source URL did not validate; no upload was attempted.
    Skipped { reason: String },
}

/// Per-item result, reported for every item including skipped ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub file_name: String,
    pub source_url: String,
    pub status: ItemStatus,
}

/// Batch lifecycle. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    NotStarted,
    FoldersEnsured,
    RecordsFetched,
    KeysAssigned,
    /// Item `index` (zero based) of `total` is being processed.
    Uploading { index: usize, total: usize },
    LogPersisted,
    Done,
}

/// Result of a completed batch.
#[derive(Debug, Clone, Default)]
pub struct TransferSummary {
    pub album_title: String,
    /// Disk path of the album folder.
    pub album_folder: String,
    pub items: Vec<ItemReport>,
    /// Entries written to the outcome log, in processing order.
    pub outcomes: Vec<TransferOutcome>,
    /// Where the log was written, if it was.
    pub log_path: Option<PathBuf>,
    /// Set when writing the log failed.
    pub log_error: Option<String>,
}

impl TransferSummary {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn uploaded(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Uploaded))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::UploadFailed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&ItemStatus) -> bool) -> usize {
        self.items.iter().filter(|i| pred(&i.status)).count()
    }
}

/// Event emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum TransferEvent {
    /// The batch entered a new state.
    State(BatchState),
    /// One item finished (uploaded, failed or skipped).
    Item {
        index: usize,
        total: usize,
        report: ItemReport,
    },
    /// The batch finished; fires even if every item failed.
    Completed { summary: TransferSummary },
}
