//! List command implementation.

use std::path::Path;

use serde::Serialize;

use super::{connect, fetch_tree};
use crate::error::Result;
use crate::remote::FileType;
use crate::tree::Item;

#[derive(Serialize)]
struct ListEntry<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'a FileType,
    path: &'a str,
}

/// One `path [id]` line per item, pre-order.
#[must_use]
pub fn render(root: &Item, sort: bool) -> String {
    root.walk(sort)
        .into_iter()
        .map(|(_, item)| format!("{} [{}]\n", item.display_path(), item.id))
        .collect()
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the token is missing or the listing fails.
pub fn execute(
    id: Option<&str>,
    sort: bool,
    token: Option<&str>,
    settings_path: &Path,
    json: bool,
) -> Result<()> {
    let client = connect(token, settings_path)?;
    let root = fetch_tree(&client, id)?;

    if json {
        let entries: Vec<ListEntry<'_>> = root
            .walk(sort)
            .into_iter()
            .map(|(_, item)| ListEntry {
                id: &item.id,
                kind: &item.kind,
                path: &item.path,
            })
            .collect();
        println!("{}", serde_json::to_string(&entries)?);
    } else {
        print!("{}", render(&root, sort));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Item {
        let mut root = Item::new("r", FileType::Folder, "/");
        let mut work = Item::new("w", FileType::Folder, "/Work");
        work.children.push(Item::new("p", FileType::Document, "/Work/Plan"));
        root.children.push(Item::new("z", FileType::Document, "/Zoo"));
        root.children.push(work);
        root
    }

    #[test]
    fn test_render_sorted() {
        assert_eq!(
            render(&sample(), true),
            "/ [r]\n/Work/ [w]\n/Work/Plan [p]\n/Zoo [z]\n"
        );
    }

    #[test]
    fn test_render_remote_order() {
        assert_eq!(
            render(&sample(), false),
            "/ [r]\n/Zoo [z]\n/Work/ [w]\n/Work/Plan [p]\n"
        );
    }
}
