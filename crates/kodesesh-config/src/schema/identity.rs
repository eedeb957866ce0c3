use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Local participant identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Override for the identity file. Defaults to
    /// `<config_dir>/kodesesh/identity.json`.
    pub path: Option<PathBuf>,
    /// Display name used when the identity is first created.
    pub default_name: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            path: None,
            default_name: "Anonymous".into(),
        }
    }
}
