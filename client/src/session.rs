//! Persisted login state.
//!
//! A session is the access token plus the profile returned by login, stored
//! as JSON in the per-user config directory (`~/.config/kirai/session.json`
//! on Linux). Every authenticated command starts with [`SessionStore::require`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{SessionError, SessionResult};
use crate::models::{LoginResponse, User};

/// Directory under the platform config dir
const SESSION_DIR: &str = "kirai";

/// File name of the stored session
const SESSION_FILE: &str = "session.json";

/// Access token and the profile of whoever obtained it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub user: User,
}

impl Session {
    pub fn new(access_token: impl Into<String>, user: User) -> Self {
        Self {
            access_token: access_token.into(),
            user,
        }
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self::new(response.tokens.access.token, response.user)
    }
}

/// Load/save/clear lifecycle for the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/kirai/session.json`
    pub fn default_location() -> SessionResult<Self> {
        let dir = dirs::config_dir().ok_or(SessionError::NoConfigDir)?;
        Ok(Self::new(dir.join(SESSION_DIR).join(SESSION_FILE)))
    }

    /// Honour `KIRAI_SESSION_FILE`, else the default location.
    pub fn from_config(config: &Config) -> SessionResult<Self> {
        match &config.session_file {
            Some(path) => Ok(Self::new(path.clone())),
            None => Self::default_location(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, or `None` when there is none.
    ///
    /// A file holding an empty token counts as no session.
    pub fn load(&self) -> SessionResult<Option<Session>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session: Session = serde_json::from_str(&content)?;
        if session.access_token.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Write the session, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        log::info!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the session. Returns whether there was one.
    pub fn clear(&self) -> SessionResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// The stored session, or [`SessionError::NotLoggedIn`].
    pub fn require(&self) -> SessionResult<Session> {
        self.load()?.ok_or(SessionError::NotLoggedIn)
    }
}
