//! Project settings file (`.dynalist.json`).
//!
//! The settings file both configures a mirror (which remote folder, which
//! local directory) and stores the local snapshot under `status`. It is
//! read at the start of `status`/`update` and rewritten in full at the end
//! of a successful `update`.
//!
//! ```json
//! {
//!   "root": "6N7uJH2c0XKzdQbNE7yRvAbZ",
//!   "dest": "notes",
//!   "status": {
//!     "Lx1s0cVmJ7Ko1eYJmCwWJ4Gd": { "path": "Work/Plan", "version": 42 }
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sync::{Snapshot, atomic_write};

/// Contents of the settings file.
///
/// Keys this tool does not know about are carried through a
/// load/save cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Remote folder id to mirror.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Local directory to mirror into, relative to the settings file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
    /// API token; takes precedence over the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Emit checkbox/complete/colorLabel/listStyle (default on).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<bool>,
    /// Emit collapsed (default on).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_state: Option<bool>,
    /// Local snapshot: document id → path and version.
    #[serde(default)]
    pub status: Snapshot,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Settings {
    /// Fresh settings mirroring `root` into `dest`.
    #[must_use]
    pub fn new(root: impl Into<String>, dest: Option<String>) -> Self {
        Self {
            root: Some(root.into()),
            dest,
            ..Self::default()
        }
    }

    /// Load settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSnapshot`] if the file does not exist, or an
    /// error if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::MissingSnapshot {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Load settings if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        match Self::load(path) {
            Ok(settings) => Ok(Some(settings)),
            Err(Error::MissingSnapshot { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write settings to `path` atomically, 2-space indented.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        atomic_write(path, &content)
    }

    /// The remote folder id, required for mirroring.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `root` is not set.
    pub fn root_id(&self) -> Result<&str> {
        self.root
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| Error::Config("Invalid settings file: missing \"root\"".to_string()))
    }

    /// Destination directory, resolved against the settings file location.
    #[must_use]
    pub fn dest_dir(&self, settings_path: &Path) -> PathBuf {
        let base = settings_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        match self.dest.as_deref() {
            Some(dest) if !dest.is_empty() => base.join(dest),
            _ => base,
        }
    }

    #[must_use]
    pub fn with_format(&self) -> bool {
        self.format.unwrap_or(true)
    }

    #[must_use]
    pub fn with_state(&self) -> bool {
        self.node_state.unwrap_or(true)
    }
}
