//! Sync types shared by export, reconciliation and the settings file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where a document lives in the mirror and which version was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncEntry {
    /// Path relative to the mirrored folder, without the `.opml` suffix.
    pub path: String,
    /// Remote version number; equal versions mean equal content.
    pub version: u64,
}

impl SyncEntry {
    #[must_use]
    pub fn new(path: impl Into<String>, version: u64) -> Self {
        Self {
            path: path.into(),
            version,
        }
    }
}

/// Document id → entry, in insertion order.
///
/// Order matters: the status report lists ids in the order they were
/// recorded, and reconciliation must never reorder them.
pub type Snapshot = IndexMap<String, SyncEntry>;

/// Sort a snapshot by path, keeping insertion order among equal paths.
#[must_use]
pub fn sorted_by_path(snapshot: &Snapshot) -> Snapshot {
    let mut sorted = snapshot.clone();
    sorted.sort_by(|_, a, _, b| a.path.cmp(&b.path));
    sorted
}

/// Statistics for an export run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    /// Documents whose file was created or rewritten.
    pub written: usize,
    /// Documents whose file already held identical content.
    pub unchanged: usize,
    /// Documents that could not be fetched, serialized or written.
    pub failed: usize,
    /// Ids of the failed documents, in export order.
    pub failed_ids: Vec<String>,
    /// Cooldown pauses taken between batches.
    pub pauses: usize,
}

impl ExportStats {
    /// Total number of documents processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.written + self.unchanged + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_stats_total() {
        let stats = ExportStats {
            written: 3,
            unchanged: 2,
            failed: 1,
            failed_ids: vec!["x".into()],
            pauses: 0,
        };
        assert_eq!(stats.total(), 6);
    }

    #[test]
    fn test_sorted_by_path_is_stable() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("c".into(), SyncEntry::new("b", 1));
        snapshot.insert("a".into(), SyncEntry::new("a", 1));
        snapshot.insert("b".into(), SyncEntry::new("b", 2));

        let sorted = sorted_by_path(&snapshot);
        let ids: Vec<&str> = sorted.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_snapshot_json_keeps_order() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("z".into(), SyncEntry::new("Zeta", 4));
        snapshot.insert("a".into(), SyncEntry::new("Alpha", 1));

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"z":{"path":"Zeta","version":4},"a":{"path":"Alpha","version":1}}"#
        );
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.keys().next().map(String::as_str), Some("z"));
    }
}
