//! Client-side session core for KodeSesh.
//!
//! Keeps one shared code buffer, its language, the participant list and a
//! shared terminal log in sync with other clients through a websocket relay,
//! and runs code against an external execution service.

pub mod channel;
pub mod document;
pub mod execution;
pub mod identity;
pub mod language;
pub mod presence;
pub mod protocol;
pub mod session;
pub mod terminal;

pub use document::SharedDocument;
pub use execution::{ExecutionService, PistonClient, PistonConfig};
pub use identity::{Identity, IdentityError, IdentityStore};
pub use language::Language;
pub use presence::{Participant, PresenceRegistry, ToggleField};
pub use session::{
    LocalAction, SessionError, SessionEvent, SessionHandle, SessionOptions, SessionSnapshot,
    SessionState,
};
pub use terminal::{EntryKind, TerminalChange, TerminalEntry, TerminalLog};
