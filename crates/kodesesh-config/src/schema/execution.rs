//! Code execution service configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external code execution service.
///
/// The compile and run timeouts are forwarded to the service with every
/// request; they are not adjustable per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Base URL of the Piston-compatible API (without `/execute`).
    pub url: String,
    /// Compile timeout in milliseconds (valid range: 100-60000).
    pub compile_timeout_ms: u32,
    /// Run timeout in milliseconds (valid range: 100-60000).
    pub run_timeout_ms: u32,
    /// Overall HTTP request timeout in seconds (valid range: 1-300).
    pub request_timeout: u32,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            url: "https://emkc.org/api/v2/piston".into(),
            compile_timeout_ms: 10_000,
            run_timeout_ms: 10_000,
            request_timeout: 30,
        }
    }
}
