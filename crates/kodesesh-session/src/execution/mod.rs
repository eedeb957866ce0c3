//! Code execution against the external service, and the relay that turns
//! each run into shared terminal entries.

mod client;
mod relay;
mod types;

pub use client::{ExecutionService, PistonClient, PistonConfig};
pub use relay::{CompletedRun, ExecutionJob, ExecutionRelay};
pub use types::{ExecutionError, ExecutionRequest, ExecutionResult};
