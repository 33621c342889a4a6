//! Destination file naming.
//!
//! Each photo of a batch gets a [`NamingKey`] that becomes its file stem in
//! the album folder. Keys come from the likes count, unless every photo in
//! the batch has the same count: then the capture time is used, since equal
//! counts (most often all zero) would make every upload overwrite the last.
//!
//! Only the all-equal case is normalized. A batch like `[5, 5, 2]` still
//! yields two `"5"` keys and the later upload replaces the earlier one.

use std::fmt;

use albumshift_source::PhotoRecord;
use chrono::{DateTime, Utc};

/// Capture time layout: sortable, second precision, filename safe.
const CAPTURED_AT_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Extension given to every uploaded file.
const FILE_EXTENSION: &str = "jpg";

/// File stem assigned to one photo in its album folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamingKey(String);

impl NamingKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Destination file name, `{key}.jpg`.
    pub fn file_name(&self) -> String {
        format!("{}.{FILE_EXTENSION}", self.0)
    }
}

impl fmt::Display for NamingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A photo paired with its assigned key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPhoto {
    pub record: PhotoRecord,
    pub key: NamingKey,
}

/// Formats a capture time the way date-based keys spell it.
pub fn format_captured_at(captured_at: DateTime<Utc>) -> String {
    captured_at.format(CAPTURED_AT_FORMAT).to_string()
}

/// Assigns a key to every record. Output order follows input order.
pub fn assign_keys(records: &[PhotoRecord]) -> Vec<NamedPhoto> {
    let uniform = records
        .first()
        .is_some_and(|first| {
            records
                .iter()
                .all(|r| r.popularity_count == first.popularity_count)
        });

    records
        .iter()
        .map(|record| {
            let key = if uniform {
                format_captured_at(record.captured_at)
            } else {
                record.popularity_count.to_string()
            };
            NamedPhoto {
                record: record.clone(),
                key: NamingKey(key),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(likes: u64, ts: i64) -> PhotoRecord {
        PhotoRecord {
            popularity_count: likes,
            captured_at: DateTime::from_timestamp(ts, 0).unwrap(),
            asset_url: format!("https://cdn.example/{ts}.jpg"),
            size_variant_tag: "w".into(),
        }
    }

    fn keys(records: &[PhotoRecord]) -> Vec<String> {
        assign_keys(records)
            .into_iter()
            .map(|n| n.key.as_str().to_string())
            .collect()
    }

    #[test]
    fn empty_batch() {
        assert!(assign_keys(&[]).is_empty());
    }

    #[test]
    fn all_zero_uses_capture_time() {
        let records: Vec<_> = (0..5).map(|i| record(0, 1_700_000_000 + i)).collect();
        let keys = keys(&records);
        assert_eq!(keys[0], "2023-11-14_22-13-20");
        assert_eq!(keys[4], "2023-11-14_22-13-24");

        let mut unique = keys.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5, "distinct timestamps give distinct keys");
    }

    #[test]
    fn singleton_uses_capture_time_not_count() {
        let keys = keys(&[record(3, 0)]);
        assert_eq!(keys, vec!["1970-01-01_00-00-00"]);
    }

    #[test]
    fn uniform_nonzero_uses_capture_time() {
        let keys = keys(&[record(4, 60), record(4, 120)]);
        assert_eq!(keys, vec!["1970-01-01_00-01-00", "1970-01-01_00-02-00"]);
    }

    #[test]
    fn mixed_counts_use_counts() {
        let keys = keys(&[record(0, 1), record(3, 2), record(10, 3)]);
        assert_eq!(keys, vec!["0", "3", "10"]);
    }

    #[test]
    fn partial_duplicates_still_collide() {
        let keys = keys(&[record(5, 1), record(5, 2), record(2, 3)]);
        assert_eq!(keys, vec!["5", "5", "2"]);
    }

    #[test]
    fn order_and_records_preserved() {
        let records = vec![record(9, 30), record(1, 10), record(5, 20)];
        let named = assign_keys(&records);
        let back: Vec<_> = named.iter().map(|n| n.record.clone()).collect();
        assert_eq!(back, records);
    }

    #[test]
    fn file_name_appends_extension() {
        let named = assign_keys(&[record(1, 0), record(2, 0)]);
        assert_eq!(named[1].key.file_name(), "2.jpg");
        assert_eq!(named[1].key.to_string(), "2");
    }
}
