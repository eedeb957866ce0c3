//! Inbound event decoding.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::events;
use super::types::{deserialize_id, deserialize_opt_id, id_from_value};
use crate::language::Language;
use crate::presence::{Participant, ToggleField};
use crate::terminal::TerminalEntry;

/// A relay event in canonical form, ready for the session reducers.
///
/// `origin` is the publishing participant when the payload names one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    CodeUpdate {
        code: String,
        origin: Option<String>,
    },
    LanguageUpdate {
        language: Language,
        origin: Option<String>,
    },
    ExecutionResult {
        entries: Vec<TerminalEntry>,
        origin: Option<String>,
    },
    ParticipantsList(Vec<Participant>),
    ParticipantJoined(Participant),
    ParticipantLeft(String),
    Toggle {
        user_id: String,
        field: ToggleField,
        value: bool,
    },
}

// ---------------------------------------------------------------------------
// Payload shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum CodePayload {
    Bare(String),
    Object {
        code: String,
        #[serde(default, rename = "userId", deserialize_with = "deserialize_opt_id")]
        user_id: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LanguagePayload {
    Bare(String),
    Object {
        language: String,
        #[serde(default, rename = "userId", deserialize_with = "deserialize_opt_id")]
        user_id: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExecutionPayload {
    Entries {
        #[serde(rename = "terminalEntries")]
        terminal_entries: Vec<TerminalEntry>,
        #[serde(default, rename = "userId", deserialize_with = "deserialize_opt_id")]
        user_id: Option<String>,
    },
    Legacy {
        output: String,
        #[serde(default, rename = "userId", deserialize_with = "deserialize_opt_id")]
        user_id: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AudioPayload {
    #[serde(deserialize_with = "deserialize_id")]
    user_id: String,
    is_muted: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoPayload {
    #[serde(deserialize_with = "deserialize_id")]
    user_id: String,
    is_video_off: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScreenPayload {
    #[serde(deserialize_with = "deserialize_id")]
    user_id: String,
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

impl InboundEvent {
    /// Decode one relay event. Unknown names and payloads that do not fit
    /// their event are dropped.
    pub fn decode(event: &str, data: Value) -> Option<Self> {
        let decoded = match event {
            events::CODE_UPDATE => parse::<CodePayload>(event, data).map(|p| match p {
                CodePayload::Bare(code) => InboundEvent::CodeUpdate { code, origin: None },
                CodePayload::Object { code, user_id } => InboundEvent::CodeUpdate {
                    code,
                    origin: user_id,
                },
            }),
            events::LANGUAGE_UPDATE => {
                let (name, origin) = match parse::<LanguagePayload>(event, data)? {
                    LanguagePayload::Bare(name) => (name, None),
                    LanguagePayload::Object { language, user_id } => (language, user_id),
                };
                match name.parse::<Language>() {
                    Ok(language) => Some(InboundEvent::LanguageUpdate { language, origin }),
                    Err(e) => {
                        debug!(error = %e, "Ignoring language update");
                        None
                    }
                }
            }
            events::EXECUTION_RESULT => parse::<ExecutionPayload>(event, data).map(|p| match p {
                ExecutionPayload::Entries {
                    terminal_entries,
                    user_id,
                } => InboundEvent::ExecutionResult {
                    entries: terminal_entries,
                    origin: user_id,
                },
                ExecutionPayload::Legacy { output, user_id } => InboundEvent::ExecutionResult {
                    entries: vec![TerminalEntry::output(output)],
                    origin: user_id,
                },
            }),
            events::PARTICIPANTS_LIST => {
                parse::<Vec<Participant>>(event, data).map(InboundEvent::ParticipantsList)
            }
            events::PARTICIPANT_JOINED => {
                parse::<Participant>(event, data).map(InboundEvent::ParticipantJoined)
            }
            events::PARTICIPANT_LEFT => left_id(&data).map(InboundEvent::ParticipantLeft),
            events::AUDIO_TOGGLED => parse::<AudioPayload>(event, data).map(|p| {
                InboundEvent::Toggle {
                    user_id: p.user_id,
                    field: ToggleField::Muted,
                    value: p.is_muted,
                }
            }),
            events::VIDEO_TOGGLED => parse::<VideoPayload>(event, data).map(|p| {
                InboundEvent::Toggle {
                    user_id: p.user_id,
                    field: ToggleField::VideoOff,
                    value: p.is_video_off,
                }
            }),
            events::SCREEN_SHARING_STARTED | events::SCREEN_SHARING_ENDED => {
                let value = event == events::SCREEN_SHARING_STARTED;
                parse::<ScreenPayload>(event, data).map(|p| InboundEvent::Toggle {
                    user_id: p.user_id,
                    field: ToggleField::ScreenSharing,
                    value,
                })
            }
            _ => {
                debug!(event, "Ignoring unknown event");
                return None;
            }
        };

        if decoded.is_none() {
            debug!(event, "Dropped inbound event");
        }
        decoded
    }
}

fn parse<T: DeserializeOwned>(event: &str, data: Value) -> Option<T> {
    match serde_json::from_value(data) {
        Ok(payload) => Some(payload),
        Err(e) => {
            debug!(event, error = %e, "Malformed payload");
            None
        }
    }
}

/// `participantLeft` carries a bare id, or an object naming one.
fn left_id(data: &Value) -> Option<String> {
    id_from_value(data).or_else(|| {
        ["id", "userId", "participantId"]
            .iter()
            .find_map(|key| data.get(*key).and_then(id_from_value))
    })
}
