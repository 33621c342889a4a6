//! Album selection by typed title.
//!
//! The prompt loop belongs to the caller; this only resolves one answer.

use albumshift_source::AlbumDescriptor;

use crate::error::TransferError;

/// Outcome of resolving one typed title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Found(AlbumDescriptor),
    /// Nothing matched; the caller should ask again.
    Retry { requested: String },
}

impl Selection {
    /// Converts a miss into [`TransferError::SelectionNotFound`].
    pub fn into_result(self) -> Result<AlbumDescriptor, TransferError> {
        match self {
            Selection::Found(album) => Ok(album),
            Selection::Retry { requested } => Err(TransferError::SelectionNotFound(requested)),
        }
    }
}

/// Resolves `input` against `candidates`, ignoring case.
///
/// Blank input selects the profile photos album.
pub fn select_album(candidates: &[AlbumDescriptor], input: &str) -> Selection {
    let wanted = input.trim();

    let found = if wanted.is_empty() {
        candidates.iter().find(|a| a.is_profile())
    } else {
        let wanted = wanted.to_lowercase();
        candidates
            .iter()
            .find(|a| a.title.to_lowercase() == wanted)
    };

    match found {
        Some(album) => Selection::Found(album.clone()),
        None => Selection::Retry {
            requested: wanted.to_string(),
        },
    }
}
