//! Dynalist remote service.
//!
//! The service exposes only a flat, id-indexed view of the store:
//!
//! - `file/list`: every document and folder, folders naming their child ids
//! - `doc/read`: one document's nodes, each naming its child node ids
//! - `doc/check_for_updates`: current version number per document id
//!
//! [`RemoteClient`] is the seam between that service and the rest of the
//! crate. [`DynalistClient`] is the HTTP implementation.

mod client;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub use client::{DEFAULT_ENDPOINT, DynalistClient, ENDPOINT_ENV};
pub use types::{Document, FileList, FileRecord, FileType, NodeRecord, VersionsResponse};

use crate::error::Result;
use indexmap::IndexMap;

/// Calls the mirror makes against the remote service.
///
/// All calls block. Failures are reported as `Error::Transport` or
/// `Error::Http` and abort the calling operation.
pub trait RemoteClient {
    /// Fetch the flat listing of all documents and folders.
    fn list_files(&self) -> Result<FileList>;

    /// Fetch one document's full node list.
    fn read_doc(&self, document_id: &str) -> Result<Document>;

    /// Fetch the current version of each requested document.
    fn check_for_updates(&self, document_ids: &[String]) -> Result<IndexMap<String, u64>>;
}
