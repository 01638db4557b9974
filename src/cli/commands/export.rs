//! Export command implementation.
//!
//! A document is written to a single file (default `<title>.opml`, `-` for
//! stdout). A folder is written to a directory (default `.`), one file per
//! document, with the batch cooldown applied between fetches.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::connect;
use crate::cli::ExportArgs;
use crate::error::{Error, Result};
use crate::outline::OutlineOptions;
use crate::remote::{FileType, RemoteClient};
use crate::sync::{ExportStats, Exporter, OPML_EXTENSION, Pacer, ThreadPacer, write_if_changed};
use crate::tree;

#[derive(Serialize)]
struct ExportOutput<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: FileType,
    dest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a ExportStats>,
}

/// What an export produced.
#[derive(Debug)]
pub enum Exported {
    /// Document written to stdout.
    Stdout(String),
    /// Document written to a file.
    File { path: PathBuf, written: bool },
    /// Folder written to a directory.
    Folder { dest: PathBuf, stats: ExportStats },
}

fn options(args: &ExportArgs) -> OutlineOptions {
    OutlineOptions {
        include_root_node: args.root_node,
        with_format: !args.no_format,
        with_state: !args.no_state,
        ..OutlineOptions::default()
    }
}

/// Export the document or folder `args.id`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the id is not in the listing,
/// [`Error::InvalidType`] if it is neither a document nor a folder, or an
/// error if a remote call or a write fails.
pub fn export_item<P: Pacer>(
    client: &dyn RemoteClient,
    args: &ExportArgs,
    pacer: P,
) -> Result<Exported> {
    let list = client.list_files()?;
    let record = list
        .files
        .iter()
        .find(|f| f.id == args.id)
        .ok_or_else(|| Error::NotFound { id: args.id.clone() })?;

    let mut exporter = Exporter::new(client, args.out.clone().unwrap_or_else(|| PathBuf::from(".")))
        .with_options(options(args))
        .with_pacer(pacer);

    match record.kind {
        FileType::Document => {
            let rendered = exporter.render_document(&args.id)?;
            match args.out.as_deref() {
                Some(out) if out == Path::new("-") => Ok(Exported::Stdout(rendered.content)),
                out => {
                    let path = out.map_or_else(
                        || PathBuf::from(format!("{}.{OPML_EXTENSION}", rendered.title)),
                        Path::to_path_buf,
                    );
                    let written = write_if_changed(&path, &rendered.content)?;
                    Ok(Exported::File { path, written })
                }
            }
        }
        FileType::Folder => {
            let root = tree::build(&list, &args.id)?.into_root();
            let stats = exporter.export_tree(&root)?;
            Ok(Exported::Folder {
                dest: exporter.dest().to_path_buf(),
                stats,
            })
        }
        FileType::Unknown => Err(Error::InvalidType {
            id: args.id.clone(),
            kind: record.kind.to_string(),
        }),
    }
}

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if the token is missing or the export fails.
pub fn execute(
    args: &ExportArgs,
    token: Option<&str>,
    settings_path: &Path,
    json: bool,
) -> Result<()> {
    let client = connect(token, settings_path)?;

    match export_item(&client, args, ThreadPacer)? {
        Exported::Stdout(content) => print!("{content}"),
        Exported::File { path, written } => {
            if json {
                let output = ExportOutput {
                    id: &args.id,
                    kind: FileType::Document,
                    dest: path.display().to_string(),
                    stats: None,
                };
                println!("{}", serde_json::to_string(&output)?);
            } else if written {
                println!("Exported {}", path.display());
            } else {
                println!("Up to date: {}", path.display());
            }
        }
        Exported::Folder { dest, stats } => {
            if json {
                let output = ExportOutput {
                    id: &args.id,
                    kind: FileType::Folder,
                    dest: dest.display().to_string(),
                    stats: Some(&stats),
                };
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!("Export complete: {}", dest.display());
                println!();
                println!("  Written:   {}", stats.written);
                println!("  Unchanged: {}", stats.unchanged);
                if stats.failed > 0 {
                    println!("  Failed:    {}", stats.failed);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::FakeRemote;
    use std::time::Duration;
    use tempfile::TempDir;

    struct NoWait;

    impl Pacer for NoWait {
        fn pause(&mut self, _duration: Duration) {}
    }

    fn args(id: &str, out: Option<PathBuf>) -> ExportArgs {
        ExportArgs {
            id: id.to_string(),
            out,
            root_node: false,
            no_format: false,
            no_state: false,
        }
    }

    fn remote() -> FakeRemote {
        FakeRemote::new("root")
            .folder("root", "", &["work"])
            .folder("work", "Work", &["plan"])
            .document("plan", "Plan", "step one", 1)
    }

    #[test]
    fn test_export_document_to_stdout() {
        let exported = export_item(&remote(), &args("plan", Some("-".into())), NoWait).unwrap();
        let Exported::Stdout(content) = exported else {
            panic!("expected stdout");
        };
        assert!(content.contains("<title>Plan</title>"));
        assert!(content.contains("<outline text=\"step one\"/>"));
    }

    #[test]
    fn test_export_document_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.opml");
        let exported = export_item(&remote(), &args("plan", Some(path.clone())), NoWait).unwrap();
        assert!(matches!(exported, Exported::File { written: true, .. }));
        assert!(path.exists());
    }

    #[test]
    fn test_export_root_node() {
        let mut with_root = args("plan", Some("-".into()));
        with_root.root_node = true;
        let Exported::Stdout(content) = export_item(&remote(), &with_root, NoWait).unwrap() else {
            panic!("expected stdout");
        };
        assert!(content.contains("<outline text=\"Plan\">"));
    }

    #[test]
    fn test_export_folder() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");
        let exported = export_item(&remote(), &args("root", Some(dest.clone())), NoWait).unwrap();
        let Exported::Folder { stats, .. } = exported else {
            panic!("expected folder");
        };
        assert_eq!(stats.written, 1);
        assert!(dest.join("Work/Plan.opml").exists());
    }

    #[test]
    fn test_export_unknown_id() {
        let result = export_item(&remote(), &args("nope", None), NoWait);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
