use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity snapshot stored alongside the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub is_admin: bool,
}

/// A logged-in session persisted between invocations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// `<config dir>/podium/session.json`, or `./podium-session.json` when the
/// platform has no config directory.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("podium").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("podium-session.json"))
}

impl Session {
    /// Read the session at `path`.
    ///
    /// A missing file means logged out. A file that does not parse is
    /// removed and also treated as logged out.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        match serde_json::from_str(&text) {
            Ok(session) => Ok(Some(session)),
            Err(_) => {
                Self::clear(path)?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Remove the session file. Removing a missing file is not an error.
    pub fn clear(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }

    pub fn require_admin(&self) -> Result<()> {
        if !self.user.is_admin {
            bail!("Only the administrator may do this (logged in as {})", self.user.name);
        }
        Ok(())
    }
}
