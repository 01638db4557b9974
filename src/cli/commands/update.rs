//! Update command implementation.

use std::path::Path;

use super::connect;
use crate::error::Result;
use crate::sync::{ThreadPacer, update};

/// Execute the update command.
///
/// # Errors
///
/// Returns an error if the settings file is missing or invalid, the token
/// is missing, or the update fails.
pub fn execute(token: Option<&str>, settings_path: &Path, json: bool) -> Result<()> {
    let client = connect(token, settings_path)?;
    let outcome = update(&client, settings_path, ThreadPacer)?;

    if json {
        println!("{}", serde_json::to_string(&outcome)?);
        return Ok(());
    }

    let stats = &outcome.stats;
    let c = &outcome.classification;
    println!("Update complete");
    println!();
    println!("  New:       {}", c.new.len());
    println!("  Modified:  {}", c.modified.len());
    println!("  Deleted:   {}", c.deleted.len());
    println!("  Changed:   {}", c.pending());
    println!("  Written:   {}", stats.written);
    println!("  Unchanged: {}", stats.unchanged);
    if stats.failed > 0 {
        println!("  Failed:    {}", stats.failed);
    }
    Ok(())
}
