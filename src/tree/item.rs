//! The owned item tree.

use serde::Serialize;
use tracing::warn;

use crate::remote::FileType;

/// A folder or document in the mirrored hierarchy.
///
/// Owned top-down: a parent owns its children and there are no
/// back-references. `path` is derived from ancestor titles on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub kind: FileType,
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Item>,
}

/// Join a title onto a POSIX-style path.
///
/// Leading slashes are stripped from `title` so a child can never produce
/// an absolute path below its parent.
#[must_use]
pub fn join_path(parent: &str, title: &str) -> String {
    if parent.is_empty() {
        return title.to_string();
    }
    let title = title.trim_start_matches('/');
    if parent.ends_with('/') {
        format!("{parent}{title}")
    } else {
        format!("{parent}/{title}")
    }
}

impl Item {
    /// Create a childless item.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: FileType, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            path: path.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == FileType::Folder
    }

    /// Last component of the path; `/` for the store root.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.path == "/" {
            return "/";
        }
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Path with a trailing `/` for folders, as shown in listings.
    #[must_use]
    pub fn display_path(&self) -> String {
        if self.is_folder() && self.path != "/" {
            format!("{}/", self.path)
        } else {
            self.path.clone()
        }
    }

    /// Path of this item relative to `base`, or `None` if it is not below it.
    #[must_use]
    pub fn relative_path(&self, base: &str) -> Option<&str> {
        if base.is_empty() {
            return Some(self.path.trim_start_matches('/'));
        }
        let rest = self.path.strip_prefix(base)?;
        if base.ends_with('/') {
            return Some(rest);
        }
        match rest.strip_prefix('/') {
            Some(rel) => Some(rel),
            None if rest.is_empty() => Some(rest),
            None => None,
        }
    }

    /// Children in remote order, or sorted by path for display.
    #[must_use]
    pub fn sorted_children(&self, sort: bool) -> Vec<&Item> {
        let mut children: Vec<&Item> = self.children.iter().collect();
        if sort {
            children.sort_by(|a, b| a.path.cmp(&b.path));
        }
        children
    }

    /// Document leaves of this subtree, depth-first in child order.
    ///
    /// Items of unknown kind are reported and skipped along with their
    /// subtree.
    #[must_use]
    pub fn documents(&self) -> Vec<&Item> {
        let mut documents = Vec::new();
        let mut stack = vec![self];

        while let Some(item) = stack.pop() {
            match item.kind {
                FileType::Document => documents.push(item),
                FileType::Folder => stack.extend(item.children.iter().rev()),
                FileType::Unknown => {
                    warn!(id = %item.id, path = %item.path, "Unknown item type, skipping");
                }
            }
        }

        documents
    }

    /// Pre-order walk of every item paired with its depth below `self`.
    #[must_use]
    pub fn walk(&self, sort: bool) -> Vec<(usize, &Item)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, self)];

        while let Some((depth, item)) = stack.pop() {
            out.push((depth, item));
            let children = item.sorted_children(sort);
            stack.extend(children.into_iter().rev().map(|c| (depth + 1, c)));
        }

        out
    }
}
