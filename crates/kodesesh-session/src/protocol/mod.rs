//! Application events carried over the relay channel.
//!
//! Inbound payloads are normalized here into one canonical shape per event,
//! so nothing past this module branches on how a payload was encoded.

mod inbound;
mod outbound;
mod types;


pub use inbound::InboundEvent;
pub use outbound::OutboundEvent;
pub use types::{deserialize_id, id_from_value};

/// Event names used on the relay channel.
pub mod events {
    // Connection sequence
    pub const JOIN_SESSION: &str = "joinSession";
    pub const USER_JOINED: &str = "userJoined";
    pub const GET_PARTICIPANTS: &str = "getParticipants";
    pub const GET_LANGUAGE_STATE: &str = "getLanguageState";

    // Shared document and terminal
    pub const CODE_UPDATE: &str = "codeUpdate";
    pub const LANGUAGE_UPDATE: &str = "languageUpdate";
    pub const EXECUTION_RESULT: &str = "executionResult";

    // Presence
    pub const PARTICIPANTS_LIST: &str = "participantsList";
    pub const PARTICIPANT_JOINED: &str = "participantJoined";
    pub const PARTICIPANT_LEFT: &str = "participantLeft";
    pub const AUDIO_TOGGLED: &str = "audioToggled";
    pub const VIDEO_TOGGLED: &str = "videoToggled";
    pub const SCREEN_SHARING_STARTED: &str = "screenSharingStarted";
    pub const SCREEN_SHARING_ENDED: &str = "screenSharingEnded";

    // Peer signaling trigger
    pub const RTC_NEW_PARTICIPANT: &str = "rtcNewParticipant";
}
