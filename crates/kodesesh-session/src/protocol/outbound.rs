//! Outbound event encoding.

use kodesesh_common::SessionId;
use serde_json::{json, Value};

use super::events;
use crate::language::Language;
use crate::terminal::TerminalEntry;

/// An event this client publishes on the relay channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    JoinSession(SessionId),
    UserJoined {
        session_id: SessionId,
        user_id: String,
        name: String,
        is_host: bool,
    },
    GetParticipants(SessionId),
    GetLanguageState(SessionId),
    CodeUpdate {
        session_id: SessionId,
        user_id: String,
        code: String,
    },
    LanguageUpdate {
        session_id: SessionId,
        user_id: String,
        language: Language,
    },
    ExecutionResult {
        session_id: SessionId,
        user_id: String,
        entries: Vec<TerminalEntry>,
    },
    AudioToggled {
        session_id: SessionId,
        user_id: String,
        is_muted: bool,
    },
    VideoToggled {
        session_id: SessionId,
        user_id: String,
        is_video_off: bool,
    },
    ScreenSharingStarted {
        session_id: SessionId,
        user_id: String,
    },
    ScreenSharingEnded {
        session_id: SessionId,
        user_id: String,
    },
    RtcNewParticipant {
        session_id: SessionId,
        participant_id: String,
    },
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::JoinSession(_) => events::JOIN_SESSION,
            OutboundEvent::UserJoined { .. } => events::USER_JOINED,
            OutboundEvent::GetParticipants(_) => events::GET_PARTICIPANTS,
            OutboundEvent::GetLanguageState(_) => events::GET_LANGUAGE_STATE,
            OutboundEvent::CodeUpdate { .. } => events::CODE_UPDATE,
            OutboundEvent::LanguageUpdate { .. } => events::LANGUAGE_UPDATE,
            OutboundEvent::ExecutionResult { .. } => events::EXECUTION_RESULT,
            OutboundEvent::AudioToggled { .. } => events::AUDIO_TOGGLED,
            OutboundEvent::VideoToggled { .. } => events::VIDEO_TOGGLED,
            OutboundEvent::ScreenSharingStarted { .. } => events::SCREEN_SHARING_STARTED,
            OutboundEvent::ScreenSharingEnded { .. } => events::SCREEN_SHARING_ENDED,
            OutboundEvent::RtcNewParticipant { .. } => events::RTC_NEW_PARTICIPANT,
        }
    }

    /// JSON payload for the `data` field of the envelope.
    pub fn payload(&self) -> Value {
        match self {
            OutboundEvent::JoinSession(id)
            | OutboundEvent::GetParticipants(id)
            | OutboundEvent::GetLanguageState(id) => json!(id.as_str()),
            OutboundEvent::UserJoined {
                session_id,
                user_id,
                name,
                is_host,
            } => json!({
                "userId": user_id,
                "name": name,
                "isHost": is_host,
                "sessionId": session_id.as_str(),
            }),
            OutboundEvent::CodeUpdate {
                session_id,
                user_id,
                code,
            } => json!({
                "sessionId": session_id.as_str(),
                "code": code,
                "userId": user_id,
            }),
            OutboundEvent::LanguageUpdate {
                session_id,
                user_id,
                language,
            } => json!({
                "sessionId": session_id.as_str(),
                "language": language.as_str(),
                "userId": user_id,
            }),
            OutboundEvent::ExecutionResult {
                session_id,
                user_id,
                entries,
            } => json!({
                "sessionId": session_id.as_str(),
                "terminalEntries": entries,
                "userId": user_id,
            }),
            OutboundEvent::AudioToggled {
                session_id,
                user_id,
                is_muted,
            } => json!({
                "sessionId": session_id.as_str(),
                "userId": user_id,
                "isMuted": is_muted,
            }),
            OutboundEvent::VideoToggled {
                session_id,
                user_id,
                is_video_off,
            } => json!({
                "sessionId": session_id.as_str(),
                "userId": user_id,
                "isVideoOff": is_video_off,
            }),
            OutboundEvent::ScreenSharingStarted {
                session_id,
                user_id,
            }
            | OutboundEvent::ScreenSharingEnded {
                session_id,
                user_id,
            } => json!({
                "sessionId": session_id.as_str(),
                "userId": user_id,
            }),
            OutboundEvent::RtcNewParticipant {
                session_id,
                participant_id,
            } => json!({
                "sessionId": session_id.as_str(),
                "participantId": participant_id,
            }),
        }
    }
}
