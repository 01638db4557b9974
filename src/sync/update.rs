//! One-shot mirror update.
//!
//! An update re-exports every document of the mirrored folder into the
//! destination directory and then replaces the snapshot in the settings
//! file with the remote state observed during the run. Documents whose
//! export failed keep their previous snapshot entry (or get none), so a
//! later `status` still reports them as pending.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::outline::OutlineOptions;
use crate::remote::RemoteClient;
use crate::sync::export::{Exporter, Pacer};
use crate::sync::reconcile::{Classification, reconcile};
use crate::sync::snapshot::remote_snapshot;
use crate::sync::types::{ExportStats, Snapshot};
use crate::tree;

/// Result of an update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOutcome {
    /// What the export wrote.
    pub stats: ExportStats,
    /// Local snapshot before the update, classified against the remote.
    pub classification: Classification,
}

/// Update the mirror described by the settings file at `settings_path`.
///
/// Versions are fetched before the documents are read, so a recorded
/// version is never newer than the content on disk.
///
/// # Errors
///
/// Returns [`crate::Error::MissingSnapshot`] if the settings file does not
/// exist, [`crate::Error::Config`] if it has no `root`,
/// [`crate::Error::InvalidType`] if `root` is not a folder, or an error if
/// a remote call fails or the settings cannot be written.
pub fn update<P: Pacer>(
    client: &dyn RemoteClient,
    settings_path: &Path,
    pacer: P,
) -> Result<UpdateOutcome> {
    let mut settings = Settings::load(settings_path)?;
    let root_id = settings.root_id()?.to_string();
    let dest = settings.dest_dir(settings_path);

    let list = client.list_files()?;
    let root = tree::build(&list, &root_id)?.into_root();
    let remote = remote_snapshot(client, &root)?;

    let options = OutlineOptions {
        with_format: settings.with_format(),
        with_state: settings.with_state(),
        ..OutlineOptions::default()
    };
    let mut exporter = Exporter::new(client, &dest)
        .with_options(options)
        .with_pacer(pacer);
    let stats = exporter.export_tree(&root)?;

    let classification = reconcile(&settings.status, &remote);
    settings.status = next_snapshot(&settings.status, remote, &stats.failed_ids);
    settings.save(settings_path)?;

    info!(
        written = stats.written,
        unchanged = stats.unchanged,
        failed = stats.failed,
        "Update complete"
    );

    Ok(UpdateOutcome {
        stats,
        classification,
    })
}

fn next_snapshot(previous: &Snapshot, mut remote: Snapshot, failed_ids: &[String]) -> Snapshot {
    for id in failed_ids {
        match previous.get(id) {
            Some(entry) => {
                remote.insert(id.clone(), entry.clone());
            }
            None => {
                remote.shift_remove(id);
            }
        }
    }
    remote
}
