//! Yandex Disk client for the destination side of a migration.
//!
//! Files are never streamed through this process: the disk is told to fetch
//! each photo from its source URL itself ("upload by reference").

pub mod client;
pub mod path;

pub use client::{Client, DiskConfig, Error, FolderStatus};
pub use path::{join_path, sanitize_segment};
