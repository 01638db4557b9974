//! Mirror status: compare the local snapshot with the remote folder.
//!
//! The report lists up to five sections in a fixed order, leaving out
//! empty ones. Each entry is the document's local path, followed by
//! ` => <remote path>` when the remote path differs, and ` *` when the
//! document takes over a path currently held by another local document.

use colored::Colorize;
use serde::Serialize;

use crate::config::Settings;
use crate::error::Result;
use crate::remote::RemoteClient;
use crate::sync::reconcile::{Classification, reconcile};
use crate::sync::snapshot::remote_snapshot;
use crate::sync::types::{Snapshot, sorted_by_path};
use crate::tree;

const NEW_HEADING: &str = "New (found only on remote)";
const DELETED_HEADING: &str = "Deleted (found only on local)";
const MODIFIED_HEADING: &str = "Modified (remote is newer than local)";
const OUTDATED_HEADING: &str = "Outdated (local is newer than remote)";
const UNCHANGED_HEADING: &str = "No Changes";

/// Both snapshots and their classification.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub local: Snapshot,
    pub remote: Snapshot,
    pub classification: Classification,
}

impl StatusReport {
    /// Classify `local` against `remote`.
    ///
    /// With `sort`, both snapshots are ordered by path first, so every
    /// section lists its entries alphabetically.
    #[must_use]
    pub fn new(local: Snapshot, remote: Snapshot, sort: bool) -> Self {
        let (local, remote) = if sort {
            (sorted_by_path(&local), sorted_by_path(&remote))
        } else {
            (local, remote)
        };
        let classification = reconcile(&local, &remote);
        Self {
            local,
            remote,
            classification,
        }
    }

    /// Non-empty sections in display order, each with its formatted entry
    /// lines.
    #[must_use]
    pub fn sections(&self) -> Vec<(&'static str, Vec<String>)> {
        let c = &self.classification;
        [
            (NEW_HEADING, &c.new),
            (DELETED_HEADING, &c.deleted),
            (MODIFIED_HEADING, &c.modified),
            (OUTDATED_HEADING, &c.outdated),
            (UNCHANGED_HEADING, &c.unchanged),
        ]
        .into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(heading, ids)| {
            let lines = ids.iter().map(|id| self.entry_line(id)).collect();
            (heading, lines)
        })
        .collect()
    }

    fn entry_line(&self, id: &str) -> String {
        let local = self.local.get(id).map(|e| e.path.as_str());
        let remote = self.remote.get(id).map(|e| e.path.as_str());

        let mut line = match (local, remote) {
            (Some(l), Some(r)) if l != r => format!("\t{l} => {r}"),
            (Some(l), _) => format!("\t{l}"),
            (None, Some(r)) => format!("\t{r}"),
            (None, None) => format!("\t{id}"),
        };
        if self.classification.is_replacing(id) {
            line.push_str(" *");
        }
        line
    }
}

/// Fetch the remote state of the mirrored folder and compare it with the
/// snapshot stored in `settings`.
///
/// # Errors
///
/// Returns an error if `root` is missing from the settings or a remote
/// call fails.
pub fn check_status(
    client: &dyn RemoteClient,
    settings: &Settings,
    sort: bool,
) -> Result<StatusReport> {
    let root_id = settings.root_id()?;
    let list = client.list_files()?;
    let root = tree::build(&list, root_id)?.into_root();
    let remote = remote_snapshot(client, &root)?;
    Ok(StatusReport::new(settings.status.clone(), remote, sort))
}

/// Render a report as plain text.
#[must_use]
pub fn format_report(report: &StatusReport) -> String {
    let mut out = String::new();
    for (heading, lines) in report.sections() {
        out.push_str(heading);
        out.push_str(":\n\n");
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Print a report to stdout with colored headings.
pub fn print_report(report: &StatusReport) {
    for (heading, lines) in report.sections() {
        let styled = match heading {
            NEW_HEADING => heading.green().bold(),
            DELETED_HEADING => heading.red().bold(),
            MODIFIED_HEADING => heading.yellow().bold(),
            OUTDATED_HEADING => heading.magenta().bold(),
            _ => heading.bold(),
        };
        println!("{styled}:");
        println!();
        for line in lines {
            println!("{line}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::FakeRemote;
    use crate::sync::types::SyncEntry;

    fn snapshot(entries: &[(&str, &str, u64)]) -> Snapshot {
        entries
            .iter()
            .map(|(id, path, version)| ((*id).to_string(), SyncEntry::new(*path, *version)))
            .collect()
    }

    #[test]
    fn test_format_report_layout() {
        let local = snapshot(&[("a", "X", 1), ("b", "Old", 2), ("d", "Gone", 1)]);
        let remote = snapshot(&[("a", "X", 1), ("b", "New", 3), ("c", "Fresh", 1)]);
        let report = StatusReport::new(local, remote, false);

        assert_eq!(
            format_report(&report),
            "New (found only on remote):\n\n\tFresh\n\n\
             Deleted (found only on local):\n\n\tGone\n\n\
             Modified (remote is newer than local):\n\n\tOld => New\n\n\
             No Changes:\n\n\tX\n\n"
        );
    }

    #[test]
    fn test_clean_report_is_empty() {
        let report = StatusReport::new(Snapshot::new(), Snapshot::new(), false);
        assert!(report.sections().is_empty());
        assert_eq!(format_report(&report), "");
    }

    #[test]
    fn test_replacing_entries_are_starred() {
        let local = snapshot(&[("a", "A", 1), ("b", "B", 1)]);
        let remote = snapshot(&[("a", "B", 1), ("b", "A", 1)]);
        let report = StatusReport::new(local, remote, false);

        let sections = report.sections();
        assert_eq!(sections.len(), 1);
        let (heading, unchanged) = &sections[0];
        assert_eq!(*heading, "No Changes");
        assert_eq!(unchanged, &vec!["\tA => B *".to_string(), "\tB => A *".to_string()]);
    }

    #[test]
    fn test_sorted_report() {
        let local = Snapshot::new();
        let remote = snapshot(&[("z", "Zulu", 1), ("a", "Alpha", 1)]);

        let report = StatusReport::new(local.clone(), remote.clone(), false);
        assert_eq!(report.sections()[0].1, vec!["\tZulu", "\tAlpha"]);

        let report = StatusReport::new(local, remote, true);
        assert_eq!(report.sections()[0].1, vec!["\tAlpha", "\tZulu"]);
    }

    #[test]
    fn test_check_status_propagates_transport_errors() {
        let settings = Settings::new("root", None);

        let mut remote = FakeRemote::new("root").folder("root", "", &[]);
        remote.failing_listing = true;
        let result = check_status(&remote, &settings, false);
        assert!(matches!(result, Err(crate::error::Error::Transport(_))));

        let mut remote = FakeRemote::new("root")
            .folder("root", "", &["a"])
            .document("a", "A", "x", 1);
        remote.failing_versions = true;
        let result = check_status(&remote, &settings, false);
        assert!(matches!(result, Err(crate::error::Error::Transport(_))));
    }

    #[test]
    fn test_check_status_against_remote() {
        let remote = FakeRemote::new("root")
            .folder("root", "", &["work"])
            .folder("work", "Work", &["plan", "todo"])
            .document("plan", "Plan", "x", 5)
            .document("todo", "Todo", "y", 1);
        let mut settings = Settings::new("work", None);
        settings.status = snapshot(&[("plan", "Plan", 4), ("todo", "Todo", 1), ("old", "Old", 1)]);

        let report = check_status(&remote, &settings, false).unwrap();
        let c = &report.classification;
        assert!(c.new.is_empty());
        assert_eq!(c.deleted, vec!["old"]);
        assert_eq!(c.modified, vec!["plan"]);
        assert_eq!(c.unchanged, vec!["todo"]);
        assert!(c.is_partition_of(&report.local, &report.remote));
    }
}
