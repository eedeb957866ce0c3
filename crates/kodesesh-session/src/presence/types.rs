//! Participant record and toggle fields, as carried on the wire.

use serde::{Deserialize, Serialize};

use crate::protocol::deserialize_id;

/// Name shown for participants that never announced one.
pub const ANONYMOUS_NAME: &str = "Anonymous";

fn anonymous() -> String {
    ANONYMOUS_NAME.to_string()
}

/// One participant in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default = "anonymous")]
    pub name: String,
    #[serde(default)]
    pub is_host: bool,
    #[serde(default)]
    pub is_muted: bool,
    #[serde(default)]
    pub is_video_off: bool,
    #[serde(default)]
    pub is_screen_sharing: bool,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_host: false,
            is_muted: false,
            is_video_off: false,
            is_screen_sharing: false,
        }
    }

    pub fn with_host(mut self, is_host: bool) -> Self {
        self.is_host = is_host;
        self
    }

    pub fn get(&self, field: ToggleField) -> bool {
        match field {
            ToggleField::Muted => self.is_muted,
            ToggleField::VideoOff => self.is_video_off,
            ToggleField::ScreenSharing => self.is_screen_sharing,
        }
    }

    pub fn set(&mut self, field: ToggleField, value: bool) {
        match field {
            ToggleField::Muted => self.is_muted = value,
            ToggleField::VideoOff => self.is_video_off = value,
            ToggleField::ScreenSharing => self.is_screen_sharing = value,
        }
    }
}

/// The boolean presence flags a participant can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleField {
    Muted,
    VideoOff,
    ScreenSharing,
}
