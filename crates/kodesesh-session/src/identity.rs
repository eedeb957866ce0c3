//! Local participant identity and its on-disk store.
//!
//! The identity is created once per machine and reused across sessions so
//! peers see the same participant id after a reconnect.

use std::path::{Path, PathBuf};

use kodesesh_common::new_id;
use kodesesh_config::IdentityConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Create a fresh identity with a random participant id.
    pub fn generate(display_name: &str) -> Self {
        Self::new(new_id(), display_name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("failed to access identity file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("identity file {path} is not valid: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Persists the local [`Identity`] as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/kodesesh/identity.json`
    pub fn default_path() -> Result<PathBuf, IdentityError> {
        kodesesh_config::config_dir()
            .map(|dir| dir.join("identity.json"))
            .map_err(|_| IdentityError::NoConfigDir)
    }

    /// Store at the configured override, or the default path.
    pub fn from_config(config: &IdentityConfig) -> Result<Self, IdentityError> {
        match &config.path {
            Some(path) => Ok(Self::new(path.clone())),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored identity. `Ok(None)` when nothing has been stored yet.
    pub fn load(&self) -> Result<Option<Identity>, IdentityError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(IdentityError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| IdentityError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }

    /// Return the stored identity, creating and saving one on first use.
    ///
    /// An unreadable file is replaced with a fresh identity.
    pub fn load_or_create(&self, default_name: &str) -> Result<Identity, IdentityError> {
        match self.load() {
            Ok(Some(identity)) => return Ok(identity),
            Ok(None) => {}
            Err(IdentityError::Parse { message, .. }) => {
                warn!(path = %self.path.display(), %message, "Replacing unreadable identity file");
            }
            Err(e) => return Err(e),
        }

        let identity = Identity::generate(default_name);
        self.save(&identity)?;
        info!(user_id = %identity.user_id, "Created local identity");
        Ok(identity)
    }

    pub fn save(&self, identity: &Identity) -> Result<(), IdentityError> {
        let io_err = |source| IdentityError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(identity).map_err(|e| IdentityError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }

    /// Rename the stored identity. The participant id never changes.
    pub fn set_display_name(&self, name: &str) -> Result<Identity, IdentityError> {
        let mut identity = self.load_or_create(name)?;
        if identity.display_name != name {
            identity.display_name = name.to_string();
            self.save(&identity)?;
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = Identity::generate("Anonymous");
        let b = Identity::generate("Anonymous");
        assert_ne!(a.user_id, b.user_id);
        assert_eq!(a.display_name, "Anonymous");
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path().join("identity.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn load_or_create_is_stable_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path().join("nested").join("identity.json"));

        let first = store.load_or_create("Anonymous").unwrap();
        let second = store.load_or_create("Someone Else").unwrap();
        assert_eq!(first, second);
        assert!(store.path().exists());
    }

    #[test]
    fn set_display_name_keeps_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path().join("identity.json"));

        let original = store.load_or_create("Anonymous").unwrap();
        let renamed = store.set_display_name("Grace").unwrap();
        assert_eq!(renamed.user_id, original.user_id);
        assert_eq!(renamed.display_name, "Grace");
        assert_eq!(store.load().unwrap(), Some(renamed));
    }

    #[test]
    fn corrupt_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = IdentityStore::new(&path);
        assert!(matches!(store.load(), Err(IdentityError::Parse { .. })));
        let identity = store.load_or_create("Anonymous").unwrap();
        assert_eq!(store.load().unwrap(), Some(identity));
    }

    #[test]
    fn from_config_prefers_override() {
        let config = IdentityConfig {
            path: Some(PathBuf::from("/tmp/kodesesh-test/me.json")),
            default_name: "Anonymous".into(),
        };
        let store = IdentityStore::from_config(&config).unwrap();
        assert_eq!(store.path(), Path::new("/tmp/kodesesh-test/me.json"));
    }
}
