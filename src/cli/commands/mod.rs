//! Command implementations.

pub mod completions;
pub mod export;
pub mod find;
pub mod init;
pub mod list;
pub mod status;
pub mod tree;
pub mod update;
pub mod version;

use std::path::Path;

use crate::config::resolve_token;
use crate::error::Result;
use crate::remote::{DynalistClient, RemoteClient};
use crate::tree::{self as item_tree, Item};

/// Build an API client from the resolved token.
///
/// # Errors
///
/// Returns [`crate::Error::TokenNotFound`] if no token is configured.
pub fn connect(token: Option<&str>, settings_path: &Path) -> Result<DynalistClient> {
    let token = resolve_token(token, settings_path)?;
    Ok(DynalistClient::from_env(token))
}

/// Fetch the listing and build the tree below `id` (default: the root).
///
/// # Errors
///
/// Returns an error if the listing cannot be fetched or `id` is unknown.
pub fn fetch_tree(client: &dyn RemoteClient, id: Option<&str>) -> Result<Item> {
    let list = client.list_files()?;
    let built = match id {
        Some(id) => item_tree::build(&list, id)?,
        None => item_tree::build_from_root(&list)?,
    };
    Ok(built.into_root())
}
