//! Participant registry for one session.
//!
//! Tracks who is in the session and their media toggles. Entries are keyed
//! by participant id and there is never more than one per id.

mod registry;
mod types;

pub use registry::PresenceRegistry;
pub use types::{Participant, ToggleField};
