//! In-memory `RemoteClient` for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use indexmap::IndexMap;

use super::{Document, FileList, FileRecord, FileType, NodeRecord, RemoteClient};
use crate::error::{Error, Result};

#[derive(Default)]
pub(crate) struct FakeRemote {
    pub root_file_id: String,
    pub files: Vec<FileRecord>,
    pub docs: RefCell<HashMap<String, Document>>,
    pub versions: RefCell<HashMap<String, u64>>,
    pub failing_docs: Vec<String>,
    pub failing_listing: bool,
    pub failing_versions: bool,
    pub reads: Cell<usize>,
}

impl FakeRemote {
    pub fn new(root_file_id: &str) -> Self {
        Self {
            root_file_id: root_file_id.to_string(),
            ..Self::default()
        }
    }

    pub fn folder(mut self, id: &str, title: &str, children: &[&str]) -> Self {
        self.files.push(FileRecord {
            id: id.to_string(),
            kind: FileType::Folder,
            title: title.to_string(),
            children: Some(children.iter().map(ToString::to_string).collect()),
        });
        self
    }

    /// Add a document holding a single top-level node with `content`.
    pub fn document(mut self, id: &str, title: &str, content: &str, version: u64) -> Self {
        self.files.push(FileRecord {
            id: id.to_string(),
            kind: FileType::Document,
            title: title.to_string(),
            children: None,
        });
        self.docs.borrow_mut().insert(
            id.to_string(),
            Document {
                file_id: id.to_string(),
                title: title.to_string(),
                version: Some(version),
                nodes: vec![
                    NodeRecord {
                        id: "root".into(),
                        content: title.to_string(),
                        children: Some(vec!["n1".into()]),
                        ..NodeRecord::default()
                    },
                    NodeRecord {
                        id: "n1".into(),
                        content: content.to_string(),
                        ..NodeRecord::default()
                    },
                ],
            },
        );
        self.versions.borrow_mut().insert(id.to_string(), version);
        self
    }

    /// Change a document's body and bump its version.
    pub fn edit(&self, id: &str, content: &str) {
        if let Some(doc) = self.docs.borrow_mut().get_mut(id) {
            doc.nodes[1].content = content.to_string();
        }
        if let Some(v) = self.versions.borrow_mut().get_mut(id) {
            *v += 1;
        }
    }
}

impl RemoteClient for FakeRemote {
    fn list_files(&self) -> Result<FileList> {
        if self.failing_listing {
            return Err(Error::Transport("file/list: failed".to_string()));
        }
        Ok(FileList {
            root_file_id: self.root_file_id.clone(),
            files: self.files.clone(),
        })
    }

    fn read_doc(&self, document_id: &str) -> Result<Document> {
        self.reads.set(self.reads.get() + 1);
        if self.failing_docs.iter().any(|d| d == document_id) {
            return Err(Error::Transport(format!("doc/read: failed for {document_id}")));
        }
        self.docs
            .borrow()
            .get(document_id)
            .cloned()
            .ok_or_else(|| Error::Transport(format!("doc/read: NotFound: {document_id}")))
    }

    fn check_for_updates(&self, document_ids: &[String]) -> Result<IndexMap<String, u64>> {
        if self.failing_versions {
            return Err(Error::Transport("doc/check_for_updates: failed".to_string()));
        }
        let versions = self.versions.borrow();
        Ok(document_ids
            .iter()
            .filter_map(|id| versions.get(id).map(|v| (id.clone(), *v)))
            .collect())
    }
}
