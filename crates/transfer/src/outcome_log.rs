//! Persisted outcome log.
//!
//! A JSON array of `{"file_name", "size_type"}` objects, four-space indented,
//! non-ASCII written verbatim.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::TransferError;
use crate::types::TransferOutcome;

const INDENT: &[u8] = b"    ";

/// Renders the log document.
pub fn render_log(outcomes: &[TransferOutcome]) -> Result<Vec<u8>, TransferError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    outcomes.serialize(&mut ser)?;
    Ok(buf)
}

/// Writes the log, replacing any previous file at `path`.
pub async fn write_log(path: &Path, outcomes: &[TransferOutcome]) -> Result<(), TransferError> {
    let bytes = render_log(outcomes)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
