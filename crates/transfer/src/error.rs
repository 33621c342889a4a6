//! Transfer error types.

/// Errors produced while transferring an album.
///
/// Only listing failures and unusable folders end a batch. Per-item faults are
/// recorded in [`ItemStatus`](crate::types::ItemStatus) instead.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("destination error {status}: {body}")]
    Destination { status: u16, body: String },

    #[error("source asset unreachable: {0}")]
    SourceAssetUnreachable(String),

    #[error("no album titled {0:?}")]
    SelectionNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<albumshift_source::Error> for TransferError {
    fn from(err: albumshift_source::Error) -> Self {
        Self::SourceUnavailable(err.to_string())
    }
}

impl From<albumshift_disk::Error> for TransferError {
    fn from(err: albumshift_disk::Error) -> Self {
        match err {
            albumshift_disk::Error::Destination { status, body } => {
                Self::Destination { status, body }
            }
            // Transport faults never produced a status.
            other => Self::Destination {
                status: 0,
                body: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_errors_become_unavailable() {
        let err = TransferError::from(albumshift_source::Error::Api {
            code: 30,
            message: "This profile is private".into(),
        });
        match err {
            TransferError::SourceUnavailable(msg) => {
                assert_eq!(msg, "API error 30: This profile is private");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn disk_status_errors_keep_status() {
        let err = TransferError::from(albumshift_disk::Error::Destination {
            status: 507,
            body: "insufficient storage".into(),
        });
        assert!(matches!(
            err,
            TransferError::Destination { status: 507, ref body } if body == "insufficient storage"
        ));
    }

    #[test]
    fn disk_faults_without_status_map_to_zero() {
        let err = TransferError::from(albumshift_disk::Error::InvalidToken);
        match err {
            TransferError::Destination { status, body } => {
                assert_eq!(status, 0);
                assert_eq!(body, "invalid OAuth token");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
