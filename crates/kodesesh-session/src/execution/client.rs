//! Execution service seam and the Piston HTTP client behind it.

use std::time::Duration;

use async_trait::async_trait;
use kodesesh_config::ExecutionConfig;
use tracing::debug;

use super::types::{ExecutionError, ExecutionRequest, ExecutionResult};

/// Something that can run a buffer and report its output.
#[async_trait]
pub trait ExecutionService: Send + Sync {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult, ExecutionError>;
}

/// Settings for [`PistonClient`].
#[derive(Debug, Clone)]
pub struct PistonConfig {
    /// API base, without the trailing `/execute`.
    pub base_url: String,
    pub compile_timeout_ms: u32,
    pub run_timeout_ms: u32,
    /// Whole-request HTTP timeout.
    pub request_timeout: Duration,
}

impl Default for PistonConfig {
    fn default() -> Self {
        Self::from(&ExecutionConfig::default())
    }
}

impl From<&ExecutionConfig> for PistonConfig {
    fn from(config: &ExecutionConfig) -> Self {
        Self {
            base_url: config.url.clone(),
            compile_timeout_ms: config.compile_timeout_ms,
            run_timeout_ms: config.run_timeout_ms,
            request_timeout: Duration::from_secs(u64::from(config.request_timeout)),
        }
    }
}

/// Client for a Piston-compatible `POST /execute` endpoint.
pub struct PistonClient {
    config: PistonConfig,
    http: reqwest::Client,
}

impl PistonClient {
    pub fn new(config: PistonConfig) -> Result<Self, ExecutionError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ExecutionError::Network(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn execute_url(&self) -> String {
        format!("{}/execute", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the JSON request body for `/execute`.
    pub(crate) fn build_request_body(&self, request: &ExecutionRequest) -> serde_json::Value {
        serde_json::json!({
            "language": request.language.service_name(),
            "version": request.language.service_version(),
            "files": [{ "content": request.code }],
            "stdin": "",
            "args": [],
            "compile_timeout": self.config.compile_timeout_ms,
            "run_timeout": self.config.run_timeout_ms,
        })
    }
}

/// Pull `run.stdout`, `run.stderr` and `run.code` out of a response body.
pub(crate) fn parse_run_response(json: &serde_json::Value) -> Result<ExecutionResult, ExecutionError> {
    let run = json
        .get("run")
        .filter(|run| run.is_object())
        .ok_or_else(|| ExecutionError::Malformed("no run object in response".to_string()))?;

    Ok(ExecutionResult {
        stdout: run["stdout"].as_str().unwrap_or_default().to_string(),
        stderr: run["stderr"].as_str().unwrap_or_default().to_string(),
        exit_code: run["code"].as_i64().unwrap_or(0),
    })
}

#[async_trait]
impl ExecutionService for PistonClient {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult, ExecutionError> {
        let body = self.build_request_body(&request);
        let url = self.execute_url();

        debug!(language = %request.language, url = %url, "Execution request");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExecutionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExecutionError::Status {
                status: status.as_u16(),
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ExecutionError::Malformed(e.to_string()))?;

        parse_run_response(&json)
    }
}
