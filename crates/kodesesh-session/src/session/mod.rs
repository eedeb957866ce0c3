//! Session state reconciliation and the task that drives it.
//!
//! [`SessionState`] holds the reducers. [`SessionHandle::connect`] spawns the
//! session loop that owns the state, the relay channel and the execution
//! service, and reports [`SessionEvent`]s back to the front end.

mod handle;
mod runtime;
mod state;
mod types;


pub use handle::SessionHandle;
pub use state::SessionState;
pub use types::{
    Effect, LocalAction, SessionError, SessionEvent, SessionOptions, SessionSnapshot,
};
