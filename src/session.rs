// Session module - the persisted login identity
//
// The store is a single JSON file holding the last authenticated identity.
// There is no expiry, validation or refresh: once saved, an identity is
// trusted until it is explicitly cleared (logout).
//
// `Session` is the owned context around the store. It loads on start, saves
// on login, clears on logout, and is the only place the identity lives.

use crate::api::Identity;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed identity store
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: ~/.config/storefront/session.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("storefront").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Previously persisted identity, if any.
    ///
    /// A missing file is the normal logged-out case. An unreadable or corrupt
    /// file is logged and treated the same way.
    pub fn load(&self) -> Option<Identity> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Could not read session file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!("Ignoring corrupt session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Persist an identity, replacing any previous one
    pub fn save(&self, identity: &Identity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(identity).context("Failed to serialize session")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;
        Ok(())
    }

    /// Remove the persisted identity. Clearing an absent session succeeds.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session file {}", self.path.display())),
        }
    }
}

/// Owned authorization context: the store plus the identity it holds
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    identity: Option<Identity>,
}

impl Session {
    /// Load-on-start
    pub fn open(store: SessionStore) -> Self {
        let identity = store.load();
        if let Some(ref id) = identity {
            tracing::info!("Restored session for {} ({})", id.username, id.user_id);
        }
        Self { store, identity }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Hold and persist a freshly authenticated identity.
    ///
    /// The in-memory identity is set even if persisting fails; the failure is
    /// returned so the caller can log it.
    pub fn establish(&mut self, identity: Identity) -> Result<()> {
        let saved = self.store.save(&identity);
        self.identity = Some(identity);
        saved
    }

    /// Clear-on-logout. The in-memory identity is always dropped.
    pub fn end(&mut self) -> Result<()> {
        self.identity = None;
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity {
            user_id: "u001".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn save_then_load_survives_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        SessionStore::new(&path).save(&alice()).unwrap();

        // A fresh store over the same file is what a restart looks like
        let reloaded = SessionStore::new(&path).load();
        assert_eq!(reloaded, Some(alice()));
    }

    #[test]
    fn missing_and_corrupt_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::new(&path);
        assert_eq!(store.load(), None);

        fs::write(&path, "{not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save(&alice()).unwrap();

        store.clear().unwrap();
        assert_eq!(store.load(), None);
        store.clear().unwrap();
    }

    #[test]
    fn session_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::open(SessionStore::new(&path));
        assert!(!session.is_authenticated());

        session.establish(alice()).unwrap();
        assert_eq!(session.identity().map(|i| i.username.as_str()), Some("alice"));
        assert!(Session::open(SessionStore::new(&path)).is_authenticated());

        session.end().unwrap();
        assert!(session.identity().is_none());
        assert!(!Session::open(SessionStore::new(&path)).is_authenticated());
    }
}
