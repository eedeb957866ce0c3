//! Session state and its reducers.
//!
//! Local actions and inbound relay events go through the same reducers.
//! Reducers never perform I/O; they return [`Effect`]s for the session loop.

use kodesesh_common::SessionId;
use tracing::debug;

use super::types::{Effect, LocalAction, SessionEvent, SessionSnapshot};
use crate::document::SharedDocument;
use crate::execution::{ExecutionError, ExecutionRelay, ExecutionResult};
use crate::identity::Identity;
use crate::language::Language;
use crate::presence::{Participant, PresenceRegistry, ToggleField};
use crate::protocol::{InboundEvent, OutboundEvent};
use crate::terminal::{TerminalChange, TerminalLog};

#[derive(Debug)]
pub struct SessionState {
    identity: Identity,
    session_id: SessionId,
    is_host: bool,
    connected: bool,
    document: SharedDocument,
    presence: PresenceRegistry,
    terminal: TerminalLog,
    relay: ExecutionRelay,
}

impl SessionState {
    pub fn new(
        identity: Identity,
        session_id: SessionId,
        is_host: bool,
        language: Language,
    ) -> Self {
        let local = Participant::new(identity.user_id.clone(), identity.display_name.clone())
            .with_host(is_host);
        Self {
            identity,
            session_id,
            is_host,
            connected: false,
            document: SharedDocument::new(language),
            presence: PresenceRegistry::new(local),
            terminal: TerminalLog::new(),
            relay: ExecutionRelay::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn presence(&self) -> &PresenceRegistry {
        &self.presence
    }

    pub fn terminal(&self) -> &TerminalLog {
        &self.terminal
    }

    pub fn is_executing(&self) -> bool {
        self.relay.is_executing()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let local = self.presence.local();
        SessionSnapshot {
            session_id: self.session_id.clone(),
            user_id: self.identity.user_id.clone(),
            is_host: self.is_host,
            connected: self.connected,
            language: self.document.language(),
            file_name: self.document.file_name(),
            code: self.document.code().to_string(),
            participants: self.presence.participants().to_vec(),
            terminal: self.terminal.entries().to_vec(),
            is_executing: self.relay.is_executing(),
            is_muted: local.is_muted,
            is_video_off: local.is_video_off,
            is_screen_sharing: local.is_screen_sharing,
        }
    }

    // -----------------------------------------------------------------------
    // Connection lifecycle
    // -----------------------------------------------------------------------

    /// Channel is up: announce ourselves, then ask for participants and the
    /// current language, in that order.
    pub fn on_connected(&mut self) -> Vec<Effect> {
        self.connected = true;
        let id = self.session_id.clone();
        vec![
            Effect::Notify(SessionEvent::ConnectionChanged(true)),
            Effect::Publish(OutboundEvent::JoinSession(id.clone())),
            Effect::Publish(OutboundEvent::UserJoined {
                session_id: id.clone(),
                user_id: self.identity.user_id.clone(),
                name: self.identity.display_name.clone(),
                is_host: self.is_host,
            }),
            Effect::Publish(OutboundEvent::GetParticipants(id.clone())),
            Effect::Publish(OutboundEvent::GetLanguageState(id)),
        ]
    }

    pub fn on_disconnected(&mut self) -> Vec<Effect> {
        if !self.connected {
            return Vec::new();
        }
        self.connected = false;
        vec![Effect::Notify(SessionEvent::ConnectionChanged(false))]
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    pub fn handle_action(&mut self, action: LocalAction) -> Vec<Effect> {
        match action {
            LocalAction::EditCode(code) => self.set_local_code(code),
            LocalAction::SelectLanguage(name) => self.set_local_language(&name),
            LocalAction::ToggleAudio => self.toggle_audio(),
            LocalAction::ToggleVideo => self.toggle_video(),
            LocalAction::SetScreenSharing(on) => self.set_screen_sharing(on),
            LocalAction::RunCode => self.run_code(),
            LocalAction::ClearTerminal => self.clear_terminal(),
        }
    }

    pub fn handle_inbound(&mut self, event: InboundEvent) -> Vec<Effect> {
        match event {
            InboundEvent::CodeUpdate { code, origin } => {
                if self.is_own(origin.as_deref()) {
                    return Vec::new();
                }
                self.apply_remote_code(code)
            }
            InboundEvent::LanguageUpdate { language, origin } => {
                if self.is_own(origin.as_deref()) {
                    return Vec::new();
                }
                self.apply_remote_language(language)
            }
            InboundEvent::ExecutionResult { entries, origin } => {
                if self.is_own(origin.as_deref()) || entries.is_empty() {
                    return Vec::new();
                }
                self.terminal.extend(entries.iter().cloned());
                vec![terminal_changed(TerminalChange::Appended(entries))]
            }
            InboundEvent::ParticipantsList(list) => {
                if self.presence.apply_participants_list(list) {
                    vec![self.participants_changed()]
                } else {
                    Vec::new()
                }
            }
            InboundEvent::ParticipantJoined(participant) => self.apply_join(participant),
            InboundEvent::ParticipantLeft(id) => {
                if self.presence.apply_leave(&id) {
                    vec![self.participants_changed()]
                } else {
                    Vec::new()
                }
            }
            InboundEvent::Toggle {
                user_id,
                field,
                value,
            } => {
                if self.presence.apply_toggle(&user_id, field, value) {
                    vec![self.participants_changed()]
                } else {
                    debug!(user_id = %user_id, ?field, "Toggle changed nothing");
                    Vec::new()
                }
            }
        }
    }

    /// Completion of the execution job `job_id`.
    pub fn complete_execution(
        &mut self,
        job_id: u64,
        outcome: Result<ExecutionResult, ExecutionError>,
    ) -> Vec<Effect> {
        let Some(done) = self.relay.complete(&mut self.terminal, job_id, outcome) else {
            return Vec::new();
        };
        let mut effects = vec![
            terminal_changed(done.change),
            Effect::Notify(SessionEvent::ExecutionStateChanged(false)),
        ];
        self.publish(
            &mut effects,
            OutboundEvent::ExecutionResult {
                session_id: self.session_id.clone(),
                user_id: self.identity.user_id.clone(),
                entries: done.broadcast,
            },
        );
        effects
    }

    // -----------------------------------------------------------------------
    // Shared document
    // -----------------------------------------------------------------------

    /// Local edit: store and publish. Never waits for the relay echo.
    pub fn set_local_code(&mut self, code: String) -> Vec<Effect> {
        if !self.document.replace_code(code.clone()) {
            return Vec::new();
        }
        let mut effects = vec![Effect::Notify(SessionEvent::CodeChanged(code.clone()))];
        self.publish(
            &mut effects,
            OutboundEvent::CodeUpdate {
                session_id: self.session_id.clone(),
                user_id: self.identity.user_id.clone(),
                code,
            },
        );
        effects
    }

    /// Remote edit: last writer wins.
    pub fn apply_remote_code(&mut self, code: String) -> Vec<Effect> {
        if !self.document.replace_code(code.clone()) {
            return Vec::new();
        }
        vec![Effect::Notify(SessionEvent::CodeChanged(code))]
    }

    pub fn set_local_language(&mut self, name: &str) -> Vec<Effect> {
        let language = match name.parse::<Language>() {
            Ok(language) => language,
            Err(e) => {
                debug!(error = %e, "Ignoring language selection");
                return Vec::new();
            }
        };
        let mut effects = self.switch_language(language);
        if !effects.is_empty() {
            self.publish(
                &mut effects,
                OutboundEvent::LanguageUpdate {
                    session_id: self.session_id.clone(),
                    user_id: self.identity.user_id.clone(),
                    language,
                },
            );
        }
        effects
    }

    pub fn apply_remote_language(&mut self, language: Language) -> Vec<Effect> {
        self.switch_language(language)
    }

    fn switch_language(&mut self, language: Language) -> Vec<Effect> {
        let code_before = self.document.code().to_string();
        if !self.document.switch_language(language) {
            return Vec::new();
        }
        let mut effects = vec![Effect::Notify(SessionEvent::LanguageChanged {
            language,
            file_name: self.document.file_name(),
        })];
        if self.document.code() != code_before {
            effects.push(Effect::Notify(SessionEvent::CodeChanged(
                self.document.code().to_string(),
            )));
        }
        effects
    }

    // -----------------------------------------------------------------------
    // Presence and media toggles
    // -----------------------------------------------------------------------

    fn apply_join(&mut self, participant: Participant) -> Vec<Effect> {
        let id = participant.id.clone();
        let mut effects = Vec::new();
        if self.presence.apply_join(participant) {
            effects.push(self.participants_changed());
        }
        if id != self.presence.local_id() {
            self.publish(
                &mut effects,
                OutboundEvent::RtcNewParticipant {
                    session_id: self.session_id.clone(),
                    participant_id: id,
                },
            );
        }
        effects
    }

    pub fn toggle_audio(&mut self) -> Vec<Effect> {
        let is_muted = !self.presence.local().is_muted;
        let mut effects = self.set_local_flag(ToggleField::Muted, is_muted);
        self.publish(
            &mut effects,
            OutboundEvent::AudioToggled {
                session_id: self.session_id.clone(),
                user_id: self.identity.user_id.clone(),
                is_muted,
            },
        );
        effects
    }

    pub fn toggle_video(&mut self) -> Vec<Effect> {
        let is_video_off = !self.presence.local().is_video_off;
        let mut effects = self.set_local_flag(ToggleField::VideoOff, is_video_off);
        self.publish(
            &mut effects,
            OutboundEvent::VideoToggled {
                session_id: self.session_id.clone(),
                user_id: self.identity.user_id.clone(),
                is_video_off,
            },
        );
        effects
    }

    pub fn set_screen_sharing(&mut self, on: bool) -> Vec<Effect> {
        if self.presence.local().is_screen_sharing == on {
            return Vec::new();
        }
        let mut effects = self.set_local_flag(ToggleField::ScreenSharing, on);
        let session_id = self.session_id.clone();
        let user_id = self.identity.user_id.clone();
        let event = if on {
            OutboundEvent::ScreenSharingStarted {
                session_id,
                user_id,
            }
        } else {
            OutboundEvent::ScreenSharingEnded {
                session_id,
                user_id,
            }
        };
        self.publish(&mut effects, event);
        effects
    }

    fn set_local_flag(&mut self, field: ToggleField, value: bool) -> Vec<Effect> {
        let local_id = self.identity.user_id.clone();
        self.presence.apply_toggle(&local_id, field, value);
        vec![self.participants_changed()]
    }

    // -----------------------------------------------------------------------
    // Terminal and execution
    // -----------------------------------------------------------------------

    pub fn run_code(&mut self) -> Vec<Effect> {
        let code = self.document.code().to_string();
        let language = self.document.language();
        let start = self.terminal.len();
        let Some(job) = self.relay.begin(&mut self.terminal, &code, language) else {
            return Vec::new();
        };
        let added = self.terminal.entries()[start..].to_vec();
        vec![
            terminal_changed(TerminalChange::Appended(added)),
            Effect::Notify(SessionEvent::ExecutionStateChanged(true)),
            Effect::Execute(job),
        ]
    }

    pub fn clear_terminal(&mut self) -> Vec<Effect> {
        if self.terminal.is_empty() {
            return Vec::new();
        }
        self.terminal.clear();
        vec![terminal_changed(TerminalChange::Cleared)]
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn is_own(&self, origin: Option<&str>) -> bool {
        let own = origin == Some(self.identity.user_id.as_str());
        if own {
            debug!("Dropping echo of own event");
        }
        own
    }

    /// Queue a publish, or drop it while the channel is down.
    fn publish(&self, effects: &mut Vec<Effect>, event: OutboundEvent) {
        if self.connected {
            effects.push(Effect::Publish(event));
        } else {
            debug!(event = event.name(), "Not connected; dropping publish");
        }
    }

    fn participants_changed(&self) -> Effect {
        Effect::Notify(SessionEvent::ParticipantsChanged(
            self.presence.participants().to_vec(),
        ))
    }
}

fn terminal_changed(change: TerminalChange) -> Effect {
    Effect::Notify(SessionEvent::TerminalChanged(change))
}
