//! Tree command implementation.

use std::fmt::Write as _;
use std::path::Path;

use super::{connect, fetch_tree};
use crate::error::Result;
use crate::tree::Item;

const BRANCH: &str = "├─";
const LAST_BRANCH: &str = "└─";
const PIPE_INDENT: &str = "│　";
const BLANK_INDENT: &str = "　　";

fn label(item: &Item) -> String {
    let name = item.name();
    if item.is_folder() && name != "/" {
        format!("{name}/ [{}]", item.id)
    } else {
        format!("{name} [{}]", item.id)
    }
}

fn push_children<'a>(
    stack: &mut Vec<(&'a Item, String, bool)>,
    parent: &'a Item,
    indent: &str,
    sort: bool,
) {
    let children = parent.sorted_children(sort);
    let last = children.len().saturating_sub(1);
    for (index, child) in children.into_iter().enumerate().rev() {
        stack.push((child, indent.to_string(), index == last));
    }
}

/// Draw `root` and its descendants with box-drawing branches.
#[must_use]
pub fn render(root: &Item, sort: bool) -> String {
    let mut out = format!("{}\n", label(root));

    // (item, indent of its own line, is last sibling)
    let mut stack: Vec<(&Item, String, bool)> = Vec::new();
    push_children(&mut stack, root, "", sort);

    while let Some((item, indent, is_last)) = stack.pop() {
        let branch = if is_last { LAST_BRANCH } else { BRANCH };
        let _ = writeln!(out, "{indent}{branch} {}", label(item));

        if item.is_folder() {
            let next = format!("{indent}{}", if is_last { BLANK_INDENT } else { PIPE_INDENT });
            push_children(&mut stack, item, &next, sort);
        }
    }

    out
}

/// Execute the tree command.
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
        println!("{}", serde_json::to_string(&root)?);
    } else {
        print!("{}", render(&root, sort));
    }
    Ok(())
}
