use serde::{Deserialize, Serialize};

/// Defaults applied when a session is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session joined when none is given on the command line.
    pub default_session_id: String,
    /// Language selected before the relay reports the shared one.
    pub initial_language: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_session_id: "demo-session".into(),
            initial_language: "javascript".into(),
        }
    }
}
