//! Commands, events, snapshot and options for a session.

use kodesesh_common::SessionId;
use kodesesh_config::KodeseshConfig;
use tokio::sync::oneshot;
use tracing::warn;

use crate::channel::ChannelConfig;
use crate::execution::ExecutionJob;
use crate::identity::IdentityError;
use crate::language::Language;
use crate::presence::Participant;
use crate::protocol::OutboundEvent;
use crate::terminal::{TerminalChange, TerminalEntry};

// ---------------------------------------------------------------------------
// Actions & Commands
// ---------------------------------------------------------------------------

/// Something the local user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalAction {
    EditCode(String),
    /// Wire name of the language; unsupported names are ignored.
    SelectLanguage(String),
    ToggleAudio,
    ToggleVideo,
    SetScreenSharing(bool),
    RunCode,
    ClearTerminal,
}

#[derive(Debug)]
pub(crate) enum SessionCommand {
    Action(LocalAction),
    Snapshot(oneshot::Sender<SessionSnapshot>),
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// State changes reported to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ConnectionChanged(bool),
    CodeChanged(String),
    LanguageChanged {
        language: Language,
        file_name: String,
    },
    ParticipantsChanged(Vec<Participant>),
    /// What changed in the terminal log. `snapshot()` has the whole log.
    TerminalChanged(TerminalChange),
    ExecutionStateChanged(bool),
}

/// What a reducer asks the session loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Publish(OutboundEvent),
    Execute(ExecutionJob),
    Notify(SessionEvent),
}

/// Point-in-time copy of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub user_id: String,
    pub is_host: bool,
    pub connected: bool,
    pub language: Language,
    pub file_name: String,
    pub code: String,
    pub participants: Vec<Participant>,
    pub terminal: Vec<TerminalEntry>,
    pub is_executing: bool,
    pub is_muted: bool,
    pub is_video_off: bool,
    pub is_screen_sharing: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session loop has stopped")]
    Closed,

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How to open a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub session_id: SessionId,
    /// True when this client created the session rather than joining one.
    pub is_host: bool,
    pub initial_language: Language,
    pub channel: ChannelConfig,
}

impl SessionOptions {
    /// Options from config. A `supplied` id joins an existing session;
    /// without one the configured default is used and this client hosts.
    pub fn from_config(config: &KodeseshConfig, supplied: Option<SessionId>) -> Self {
        let is_host = supplied.is_none();
        let session_id = supplied
            .unwrap_or_else(|| SessionId::new(config.session.default_session_id.clone()));

        let initial_language = match config.session.initial_language.parse::<Language>() {
            Ok(language) => language,
            Err(e) => {
                warn!(error = %e, "Falling back to default language");
                Language::default()
            }
        };

        Self {
            session_id,
            is_host,
            initial_language,
            channel: ChannelConfig::from(&config.relay),
        }
    }
}
