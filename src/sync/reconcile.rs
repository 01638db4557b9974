//! Reconciliation of the local snapshot against the remote one.
//!
//! Every id in `local ∪ remote` lands in exactly one of `new`, `deleted`,
//! `modified`, `outdated` or `unchanged`. On top of that partition,
//! `replace_existing` marks remote ids that now occupy a path recorded
//! locally under a different id: the old document at that path was deleted
//! and an unrelated one was created there.
//!
//! All lists keep snapshot insertion order. The remote-driven pass runs
//! first, then the local-driven pass.

use std::collections::HashMap;

use serde::Serialize;

use super::types::Snapshot;

/// Outcome of [`reconcile`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Only on remote.
    pub new: Vec<String>,
    /// Only on local.
    pub deleted: Vec<String>,
    /// Remote version is newer.
    pub modified: Vec<String>,
    /// Local version is newer than what remote reports.
    pub outdated: Vec<String>,
    /// Same version on both sides.
    pub unchanged: Vec<String>,
    /// Remote ids sitting on a path that a different local id used to hold.
    pub replace_existing: Vec<String>,
}

impl Classification {
    /// Whether `id` is flagged as replacing an existing local path.
    #[must_use]
    pub fn is_replacing(&self, id: &str) -> bool {
        self.replace_existing.iter().any(|r| r == id)
    }

    /// True when nothing but `unchanged` is populated.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.new.is_empty()
            && self.deleted.is_empty()
            && self.modified.is_empty()
            && self.outdated.is_empty()
    }

    /// Ids that need a fresh export.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.new.len() + self.modified.len()
    }

    /// Check that the five primary lists partition `local ∪ remote`.
    #[must_use]
    pub fn is_partition_of(&self, local: &Snapshot, remote: &Snapshot) -> bool {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for id in self
            .new
            .iter()
            .chain(&self.deleted)
            .chain(&self.modified)
            .chain(&self.outdated)
            .chain(&self.unchanged)
        {
            *seen.entry(id.as_str()).or_default() += 1;
        }

        let expected = local.keys().chain(remote.keys().filter(|k| !local.contains_key(*k)));
        let mut count = 0;
        for id in expected {
            if seen.get(id.as_str()) != Some(&1) {
                return false;
            }
            count += 1;
        }
        count == seen.len()
    }
}

/// Classify every id of `local` and `remote`.
#[must_use]
pub fn reconcile(local: &Snapshot, remote: &Snapshot) -> Classification {
    let mut result = Classification::default();

    for (id, theirs) in remote {
        let Some(ours) = local.get(id) else {
            result.new.push(id.clone());
            continue;
        };
        match ours.version.cmp(&theirs.version) {
            std::cmp::Ordering::Greater => result.outdated.push(id.clone()),
            std::cmp::Ordering::Less => result.modified.push(id.clone()),
            std::cmp::Ordering::Equal => result.unchanged.push(id.clone()),
        }
    }

    // path -> remote ids on that path, in remote order. Scanning this index
    // for each local id yields the same sequence as a full local × remote
    // scan would.
    let mut by_path: HashMap<&str, Vec<&str>> = HashMap::new();
    for (id, entry) in remote {
        by_path.entry(entry.path.as_str()).or_default().push(id.as_str());
    }

    for (id, ours) in local {
        if !remote.contains_key(id) {
            result.deleted.push(id.clone());
        }

        let Some(occupants) = by_path.get(ours.path.as_str()) else {
            continue;
        };
        for &other in occupants {
            if other != id.as_str() && !result.is_replacing(other) {
                result.replace_existing.push(other.to_string());
            }
        }
    }

    result
}
