//! Computing the remote side of a reconciliation.

use tracing::warn;

use crate::error::Result;
use crate::remote::RemoteClient;
use crate::sync::types::{Snapshot, SyncEntry};
use crate::tree::Item;

/// Collect id → `{path, version}` for every document below `root`.
///
/// Paths are relative to `root`. Documents are listed depth-first in
/// child order, which is also the order of the returned snapshot. A
/// document the service reports no version for is left out with a
/// warning.
///
/// # Errors
///
/// Returns an error if `doc/check_for_updates` fails.
pub fn remote_snapshot(client: &dyn RemoteClient, root: &Item) -> Result<Snapshot> {
    let documents = root.documents();
    let ids: Vec<String> = documents.iter().map(|d| d.id.clone()).collect();

    let versions = if ids.is_empty() {
        Default::default()
    } else {
        client.check_for_updates(&ids)?
    };

    let mut snapshot = Snapshot::with_capacity(documents.len());
    for doc in documents {
        let Some(version) = versions.get(&doc.id) else {
            warn!(id = %doc.id, path = %doc.path, "No version reported, skipping");
            continue;
        };
        let path = doc.relative_path(&root.path).unwrap_or(&doc.path);
        snapshot.insert(doc.id.clone(), SyncEntry::new(path, *version));
    }

    Ok(snapshot)
}
