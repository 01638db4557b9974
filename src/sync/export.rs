//! Folder export with rate-limited document fetches.
//!
//! `doc/read` is rate limited by the service. The exporter therefore
//! fetches documents in fixed-size batches and, between batches, blocks
//! for a full cooldown window before continuing. No pause follows the last
//! batch.
//!
//! # Layout
//!
//! A document at `<folder>/A/B/Doc` is written to `<dest>/A/B/Doc.opml`.
//! Intermediate directories are created on demand. Files whose content is
//! already identical are left alone, so re-running an export against an
//! unchanged remote touches nothing on disk.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::outline::{self, OutlineOptions};
use crate::remote::RemoteClient;
use crate::sync::file::write_if_changed;
use crate::sync::types::ExportStats;
use crate::tree::Item;

/// Documents fetched per batch (`doc/read` allows 30 calls per minute).
pub const BATCH_SIZE: usize = 20;

/// Pause between batches.
pub const COOLDOWN: Duration = Duration::from_secs(60);

/// Extension of exported files.
pub const OPML_EXTENSION: &str = "opml";

/// How the exporter waits out a cooldown.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Blocks the calling thread for the full cooldown.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A document rendered to OPML, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub title: String,
    pub content: String,
}

/// Exporter for OPML mirror files.
pub struct Exporter<'a, P: Pacer = ThreadPacer> {
    client: &'a dyn RemoteClient,
    dest: PathBuf,
    options: OutlineOptions,
    batch_size: usize,
    cooldown: Duration,
    pacer: P,
}

impl<'a> Exporter<'a, ThreadPacer> {
    /// Create an exporter writing below `dest` with the default batching.
    #[must_use]
    pub fn new(client: &'a dyn RemoteClient, dest: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dest: dest.into(),
            options: OutlineOptions::default(),
            batch_size: BATCH_SIZE,
            cooldown: COOLDOWN,
            pacer: ThreadPacer,
        }
    }
}

impl<'a, P: Pacer> Exporter<'a, P> {
    /// Replace the cooldown strategy.
    #[must_use]
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> Exporter<'a, Q> {
        Exporter {
            client: self.client,
            dest: self.dest,
            options: self.options,
            batch_size: self.batch_size,
            cooldown: self.cooldown,
            pacer,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: OutlineOptions) -> Self {
        self.options = options;
        self
    }

    /// Override batch size (minimum 1) and cooldown.
    #[must_use]
    pub fn with_batching(mut self, batch_size: usize, cooldown: Duration) -> Self {
        self.batch_size = batch_size.max(1);
        self.cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    #[must_use]
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Fetch one document and render it.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails.
    pub fn render_document(&self, document_id: &str) -> Result<RenderedDocument> {
        let doc = self.client.read_doc(document_id)?;
        let content = outline::write_document(&doc.title, &doc.nodes, &self.options);
        Ok(RenderedDocument {
            title: doc.title,
            content,
        })
    }

    /// Fetch, render and write one document to `path`.
    ///
    /// Returns `true` if the file was written, `false` if it was current.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call or the write fails.
    pub fn write_document(&self, document_id: &str, path: &Path) -> Result<bool> {
        let rendered = self.render_document(document_id)?;
        write_if_changed(path, &rendered.content)
    }

    /// Export every document below the folder `item`.
    ///
    /// Per-document failures are logged and counted; the export carries
    /// on with the next document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidType`] if `item` is not a folder, or an
    /// error if the destination directory cannot be prepared.
    pub fn export_tree(&mut self, item: &Item) -> Result<ExportStats> {
        if !item.is_folder() {
            return Err(Error::InvalidType {
                id: item.id.clone(),
                kind: item.kind.to_string(),
            });
        }

        prepare_dir(&self.dest)?;

        let documents = item.documents();
        let total = documents.len();
        let mut stats = ExportStats::default();
        info!(total, dest = %self.dest.display(), "Exporting documents");

        for (index, batch) in documents.chunks(self.batch_size).enumerate() {
            for doc in batch {
                let Some(relative) = doc.relative_path(&item.path).filter(|r| stays_inside(r))
                else {
                    warn!(id = %doc.id, path = %doc.path, "Document outside export root");
                    stats.failed += 1;
                    stats.failed_ids.push(doc.id.clone());
                    continue;
                };
                let path = self.dest.join(format!("{relative}.{OPML_EXTENSION}"));

                match self.write_document(&doc.id, &path) {
                    Ok(true) => {
                        debug!(path = %path.display(), "Written");
                        stats.written += 1;
                    }
                    Ok(false) => stats.unchanged += 1,
                    Err(e) => {
                        warn!(id = %doc.id, path = %doc.path, error = %e, "Export failed");
                        stats.failed += 1;
                        stats.failed_ids.push(doc.id.clone());
                    }
                }
            }

            let done = (index + 1) * self.batch_size;
            if done < total {
                info!(done, total, seconds = self.cooldown.as_secs(), "Rate limit cooldown");
                self.pacer.pause(self.cooldown);
                stats.pauses += 1;
            }
        }

        Ok(stats)
    }
}

/// Whether joining `relative` onto a directory stays inside it.
fn stays_inside(relative: &str) -> bool {
    !relative.is_empty()
        && Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn prepare_dir(dest: &Path) -> Result<()> {
    if dest.as_os_str().is_empty() {
        return Ok(());
    }
    if dest.exists() && !dest.is_dir() {
        return Err(Error::InvalidArgument(format!(
            "Not a directory: {}",
            dest.display()
        )));
    }
    fs::create_dir_all(dest)?;
    Ok(())
}
