//! Version command implementation.

use crate::error::Result;
use crate::remote::DEFAULT_ENDPOINT;
use serde::Serialize;

#[derive(Serialize)]
struct VersionInfo<'a> {
    name: &'a str,
    version: &'a str,
    api: &'a str,
}

fn info() -> VersionInfo<'static> {
    VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        api: DEFAULT_ENDPOINT,
    }
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let info = info();
    if json {
        println!("{}", serde_json::to_string(&info)?);
    } else {
        println!("dlm {} ({}, api {})", info.version, info.name, info.api);
    }
    Ok(())
}
