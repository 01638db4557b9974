//! Create a settings file for a new mirror.

use crate::config::Settings;
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct InitOutput<'a> {
    path: &'a Path,
    root: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dest: Option<&'a str>,
}

/// Write a fresh settings file at `settings_path`.
///
/// The snapshot starts empty, so the first `status` reports every remote
/// document as new.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the file exists and `force` is not
/// set, or an error if the write fails.
pub fn init_settings(
    settings_path: &Path,
    root: &str,
    dest: Option<&str>,
    force: bool,
) -> Result<Settings> {
    if root.is_empty() {
        return Err(Error::InvalidArgument("Root id must not be empty".to_string()));
    }
    if settings_path.exists() && !force {
        return Err(Error::InvalidArgument(format!(
            "Settings file already exists: {} (use --force to overwrite)",
            settings_path.display()
        )));
    }

    let settings = Settings::new(root, dest.map(String::from));
    settings.save(settings_path)?;
    Ok(settings)
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the settings file cannot be created.
pub fn execute(
    settings_path: &Path,
    root: &str,
    dest: Option<&str>,
    force: bool,
    json: bool,
) -> Result<()> {
    init_settings(settings_path, root, dest, force)?;

    if json {
        let output = InitOutput {
            path: settings_path,
            root,
            dest,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Created {}", settings_path.display());
        println!("  Mirroring folder {root}");
        println!();
        println!("Run 'dlm status' to compare with the remote folder.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".dynalist.json");
        init_settings(&path, "abc", Some("notes"), false).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.root.as_deref(), Some("abc"));
        assert_eq!(settings.dest.as_deref(), Some("notes"));
        assert!(settings.status.is_empty());
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".dynalist.json");
        init_settings(&path, "abc", None, false).unwrap();

        let result = init_settings(&path, "def", None, false);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        init_settings(&path, "def", None, true).unwrap();
        assert_eq!(Settings::load(&path).unwrap().root.as_deref(), Some("def"));
    }
}
