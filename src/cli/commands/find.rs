//! Find command implementation.

use std::path::Path;

use regex::{Regex, RegexBuilder};

use super::{connect, fetch_tree};
use crate::error::{Error, Result};
use crate::tree::Item;

/// Compile a user pattern.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the pattern does not compile.
pub fn compile(pattern: &str, ignore_case: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| Error::InvalidArgument(format!("Invalid pattern: {e}")))
}

/// Name a pattern is matched against; the store root has an empty name.
fn match_name(item: &Item) -> &str {
    if item.path == "/" { "" } else { item.name() }
}

/// Items whose name contains a match, pre-order.
#[must_use]
pub fn matches<'a>(root: &'a Item, pattern: &Regex, sort: bool) -> Vec<&'a Item> {
    root.walk(sort)
        .into_iter()
        .map(|(_, item)| item)
        .filter(|item| pattern.is_match(match_name(item)))
        .collect()
}

/// Execute the find command over the whole store.
///
/// # Errors
///
/// Returns an error if the pattern is invalid, the token is missing or
/// the listing fails.
pub fn execute(
    pattern: &str,
    ignore_case: bool,
    sort: bool,
    token: Option<&str>,
    settings_path: &Path,
    json: bool,
) -> Result<()> {
    let pattern = compile(pattern, ignore_case)?;
    let client = connect(token, settings_path)?;
    let root = fetch_tree(&client, None)?;
    let found = matches(&root, &pattern, sort);

    if json {
        println!("{}", serde_json::to_string(&found)?);
        return Ok(());
    }

    for item in found {
        println!("{} [{}]", item.display_path(), item.id);
    }
    Ok(())
}
