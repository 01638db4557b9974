//! Configuration management.
//!
//! This module locates the project settings file and resolves the API
//! token.
//!
//! # Token resolution
//!
//! 1. `--token` flag
//! 2. `token` key of the settings file
//! 3. `DYNALIST_TOKEN` environment variable
//! 4. First line of `./.dynalistrc`
//! 5. First line of `~/.dynalistrc`

mod settings;

pub use settings::Settings;

use crate::error::{Error, Result};

use std::path::{Path, PathBuf};

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = ".dynalist.json";

/// Environment variable carrying the API token.
pub const TOKEN_ENV: &str = "DYNALIST_TOKEN";

/// Token file name, looked up in the working and home directories.
pub const TOKEN_FILE: &str = ".dynalistrc";

/// Resolve the settings file path.
#[must_use]
pub fn resolve_settings_path(explicit_path: Option<&Path>) -> PathBuf {
    explicit_path.map_or_else(|| PathBuf::from(SETTINGS_FILE), Path::to_path_buf)
}

/// Read a token from the first line of `path`.
///
/// Returns `None` if the file is missing, unreadable or blank.
#[must_use]
pub fn read_token_file(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let token = content.lines().next()?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Candidate token files, working directory first.
#[must_use]
pub fn token_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(TOKEN_FILE)];
    if let Some(dirs) = directories::BaseDirs::new() {
        candidates.push(dirs.home_dir().join(TOKEN_FILE));
    }
    candidates
}

/// Resolve the API token from the given sources, in priority order.
///
/// # Errors
///
/// Returns [`Error::TokenNotFound`] if no source yields a token.
pub fn resolve_token_from(
    explicit: Option<&str>,
    settings: Option<&Settings>,
    env_token: Option<String>,
    token_files: &[PathBuf],
) -> Result<String> {
    if let Some(token) = explicit.filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    if let Some(token) = settings.and_then(|s| s.token.as_deref()).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    if let Some(token) = env_token.filter(|t| !t.is_empty()) {
        return Ok(token);
    }

    token_files
        .iter()
        .find_map(|path| read_token_file(path))
        .ok_or(Error::TokenNotFound)
}

/// Resolve the API token from the flag, settings file, environment and
/// token files.
///
/// # Errors
///
/// Returns [`Error::TokenNotFound`] if no source yields a token, or an
/// error if the settings file exists but is unreadable.
pub fn resolve_token(explicit: Option<&str>, settings_path: &Path) -> Result<String> {
    if let Some(token) = explicit.filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }
    let settings = Settings::load_optional(settings_path)?;
    resolve_token_from(
        None,
        settings.as_ref(),
        std::env::var(TOKEN_ENV).ok(),
        &token_file_candidates(),
    )
}
