//! Album transfer pipeline.
//!
//! Moves one source album into a destination folder: folders are ensured,
//! photos listed and named, then uploaded by reference one at a time. The
//! outcome of each attempted upload is persisted as a JSON log.
//!
//! The source and the destination are reached through the [`PhotoSource`]
//! and [`DestinationStore`] traits so the pipeline can run against in-memory
//! doubles.

pub mod error;
pub mod naming;
pub mod orchestrator;
pub mod outcome_log;
pub mod selection;
pub mod source;
pub mod store;
pub mod types;

pub use error::TransferError;
pub use naming::{NamedPhoto, NamingKey, assign_keys, format_captured_at};
pub use orchestrator::TransferOrchestrator;
pub use outcome_log::{render_log, write_log};
pub use selection::{Selection, select_album};
pub use source::PhotoSource;
pub use store::DestinationStore;
pub use types::{
    BatchState, DEFAULT_DESTINATION_FOLDER, DEFAULT_LOG_FILE, DEFAULT_PAGE_SIZE, ItemReport,
    ItemStatus, TransferConfig, TransferEvent, TransferOutcome, TransferSummary,
};
