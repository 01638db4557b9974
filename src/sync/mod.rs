//! Mirroring a remote folder into a local directory of OPML files.
//!
//! - **Export**: folder → `<dest>/<path>.opml`, fetched in rate-limited batches
//! - **Snapshot**: id → `{path, version}` of every mirrored document
//! - **Reconcile**: classify a local snapshot against the remote one
//! - **Status**: render a reconciliation as a report
//! - **Update**: export, then persist the new snapshot
//!
//! # Example
//!
//! ```ignore
//! use dlm::sync::{self, ThreadPacer};
//!
//! let report = sync::check_status(&client, &settings, false)?;
//! sync::print_report(&report);
//!
//! let outcome = sync::update(&client, &settings_path, ThreadPacer)?;
//! ```

mod export;
mod file;
mod hash;
mod reconcile;
mod snapshot;
mod status;
mod types;
mod update;

pub use export::{
    BATCH_SIZE, COOLDOWN, Exporter, OPML_EXTENSION, Pacer, RenderedDocument, ThreadPacer,
};
pub use file::{atomic_write, write_if_changed};
pub use hash::{content_hash, has_changed};
pub use reconcile::{Classification, reconcile};
pub use snapshot::remote_snapshot;
pub use status::{StatusReport, check_status, format_report, print_report};
pub use types::{ExportStats, Snapshot, SyncEntry, sorted_by_path};
pub use update::{UpdateOutcome, update};
