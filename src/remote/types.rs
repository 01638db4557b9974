//! Wire types for the Dynalist API.
//!
//! Every field the API may omit is modelled as an `Option` (or a serde
//! default) so that presence checks happen once, at deserialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of a file entry in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Document,
    Folder,
    /// Anything the API may add later. Walks report and skip these.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Folder => write!(f, "folder"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One flat entry of `file/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FileType,
    #[serde(default)]
    pub title: String,
    /// Child ids in display order. Only folders carry this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

/// Response of `file/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileList {
    pub root_file_id: String,
    pub files: Vec<FileRecord>,
}

/// One node of a document outline, as returned by `doc/read`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Colour label 0-6; 0 means no colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbered: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// `None` marks a leaf. `Some(vec![])` is an (empty) container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

/// Response of `doc/read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: Option<u64>,
    pub nodes: Vec<NodeRecord>,
}

/// Response of `doc/check_for_updates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionsResponse {
    pub versions: IndexMap<String, u64>,
}
