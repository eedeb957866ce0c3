//! Configuration schema types for KodeSesh.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod execution;
mod identity;
mod logging;
mod relay;
mod session;

pub use execution::*;
pub use identity::*;
pub use logging::*;
pub use relay::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for KodeSesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct KodeseshConfig {
    pub relay: RelayConfig,
    pub execution: ExecutionConfig,
    pub session: SessionConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
}
