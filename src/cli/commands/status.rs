//! Status command implementation.

use std::path::Path;

use super::connect;
use crate::config::Settings;
use crate::error::Result;
use crate::sync::{check_status, print_report};

/// Execute the status command.
///
/// # Errors
///
/// Returns [`crate::Error::MissingSnapshot`] if there is no settings file,
/// or an error if the token is missing or a remote call fails.
pub fn execute(sort: bool, token: Option<&str>, settings_path: &Path, json: bool) -> Result<()> {
    let settings = Settings::load(settings_path)?;
    let client = connect(token, settings_path)?;
    let report = check_status(&client, &settings, sort)?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}
