//! Build an [`Item`] tree from the flat `file/list` listing.
//!
//! Construction runs in two phases so that nothing recurses:
//!
//! 1. A worklist walks the listing from the chosen root, appending one
//!    arena slot per reachable item. Each slot records its parent slot and
//!    its child slots in listed order.
//! 2. Slots are assembled into owned `Item`s from the back of the arena.
//!    A child slot always comes after its parent, so every child is
//!    finished before its parent takes ownership of it.

use std::collections::HashMap;

use tracing::warn;

use super::item::{Item, join_path};
use crate::error::{Error, Result};
use crate::remote::{FileList, FileRecord, FileType};

/// Result of a tree build: the tree plus the per-child failures that were
/// skipped along the way.
#[derive(Debug)]
pub struct BuiltTree {
    pub root: Item,
    pub errors: Vec<Error>,
}

impl BuiltTree {
    #[must_use]
    pub fn into_root(self) -> Item {
        self.root
    }
}

struct Slot<'a> {
    record: &'a FileRecord,
    parent: Option<usize>,
    path: String,
    children: Vec<usize>,
}

/// Build the subtree rooted at `root_id`.
///
/// The listing's own root record is always titled `/`. A child id missing
/// from the listing, or one that would close a cycle, is skipped and
/// recorded in [`BuiltTree::errors`]; the rest of the tree still builds.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `root_id` is not in the listing.
pub fn build(list: &FileList, root_id: &str) -> Result<BuiltTree> {
    let index: HashMap<&str, &FileRecord> =
        list.files.iter().map(|f| (f.id.as_str(), f)).collect();

    let title_of = |record: &FileRecord| -> String {
        if record.id == list.root_file_id {
            "/".to_string()
        } else {
            record.title.clone()
        }
    };

    let root = index.get(root_id).copied().ok_or_else(|| Error::NotFound {
        id: root_id.to_string(),
    })?;

    let mut errors = Vec::new();
    let mut arena = vec![Slot {
        record: root,
        parent: None,
        path: join_path("", &title_of(root)),
        children: Vec::new(),
    }];
    let mut worklist = vec![0usize];

    while let Some(slot) = worklist.pop() {
        let Some(child_ids) = arena[slot].record.children.as_ref() else {
            continue;
        };

        for child_id in child_ids {
            let Some(child) = index.get(child_id.as_str()).copied() else {
                warn!(id = %child_id, parent = %arena[slot].record.id, "Item not found, skipping");
                errors.push(Error::NotFound { id: child_id.clone() });
                continue;
            };

            if is_ancestor(&arena, slot, child_id) {
                warn!(id = %child_id, parent = %arena[slot].record.id, "Cycle in listing, skipping");
                errors.push(Error::CycleDetected { id: child_id.clone() });
                continue;
            }

            let path = join_path(&arena[slot].path, &title_of(child));
            let next = arena.len();
            arena.push(Slot {
                record: child,
                parent: Some(slot),
                path,
                children: Vec::new(),
            });
            arena[slot].children.push(next);
            worklist.push(next);
        }
    }

    Ok(BuiltTree {
        root: assemble(arena),
        errors,
    })
}

/// Build the whole store, starting at the listing's own root.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the listing's root record is missing.
pub fn build_from_root(list: &FileList) -> Result<BuiltTree> {
    build(list, &list.root_file_id)
}

fn is_ancestor(arena: &[Slot<'_>], mut slot: usize, id: &str) -> bool {
    loop {
        if arena[slot].record.id == id {
            return true;
        }
        match arena[slot].parent {
            Some(parent) => slot = parent,
            None => return false,
        }
    }
}

fn assemble(arena: Vec<Slot<'_>>) -> Item {
    let mut built: Vec<Option<Item>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    for (index, slot) in arena.into_iter().enumerate().rev() {
        let children = slot
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(Item {
            id: slot.record.id.clone(),
            kind: slot.record.kind,
            path: slot.path,
            children,
        });
    }

    // Slot 0 is always the root and is never taken by a parent.
    built.swap_remove(0).unwrap_or_else(|| Item::new("", FileType::Unknown, ""))
}
