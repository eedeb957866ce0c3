//! At-most-one execution per client, fanned into the terminal log.

use tracing::{debug, info};

use super::client::ExecutionService;
use super::types::{ExecutionError, ExecutionRequest, ExecutionResult};
use crate::language::Language;
use crate::terminal::{TerminalChange, TerminalEntry, TerminalLog};

/// A started run, handed to whoever performs the service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionJob {
    pub id: u64,
    pub request: ExecutionRequest,
}

/// A finished run: what to broadcast and how the local log changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRun {
    /// The input entry followed by the results.
    pub broadcast: Vec<TerminalEntry>,
    pub change: TerminalChange,
}

#[derive(Debug, Clone)]
struct InFlight {
    id: u64,
    input: TerminalEntry,
}

#[derive(Debug, Default)]
pub struct ExecutionRelay {
    in_flight: Option<InFlight>,
    next_id: u64,
}

impl ExecutionRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_executing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a run: record the invocation and show the progress marker.
    ///
    /// Returns `None` without touching the log if a run is already in flight.
    pub fn begin(
        &mut self,
        log: &mut TerminalLog,
        code: &str,
        language: Language,
    ) -> Option<ExecutionJob> {
        if self.in_flight.is_some() {
            debug!("Execution already in flight; ignoring run request");
            return None;
        }

        self.next_id += 1;
        let id = self.next_id;
        let input = TerminalEntry::input(format!("run {}", language.file_name()));
        log.append(input.clone());
        log.begin_progress();
        self.in_flight = Some(InFlight { id, input });

        info!(job_id = id, %language, "Execution started");
        Some(ExecutionJob {
            id,
            request: ExecutionRequest {
                language,
                code: code.to_string(),
            },
        })
    }

    /// Finish the run `id`: swap the marker for the outcome.
    ///
    /// Completions for any other job are ignored.
    pub fn complete(
        &mut self,
        log: &mut TerminalLog,
        id: u64,
        outcome: Result<ExecutionResult, ExecutionError>,
    ) -> Option<CompletedRun> {
        let in_flight = match self.in_flight.take() {
            Some(job) if job.id == id => job,
            other => {
                debug!(job_id = id, "Ignoring stale execution completion");
                self.in_flight = other;
                return None;
            }
        };

        let results = match outcome {
            Ok(result) => {
                info!(job_id = id, exit_code = result.exit_code, "Execution finished");
                result.into_entries()
            }
            Err(e) => {
                info!(job_id = id, error = %e, "Execution failed");
                vec![TerminalEntry::error(format!("Execution failed: {e}"))]
            }
        };

        let mut broadcast = Vec::with_capacity(results.len() + 1);
        broadcast.push(in_flight.input);
        broadcast.extend(results.iter().cloned());
        let change = log.resolve_progress(results);
        Some(CompletedRun { broadcast, change })
    }

    /// Run `code` to completion against `service`.
    ///
    /// Returns `None` if a run was already in flight.
    pub async fn execute(
        &mut self,
        log: &mut TerminalLog,
        service: &dyn ExecutionService,
        code: &str,
        language: Language,
    ) -> Option<CompletedRun> {
        let job = self.begin(log, code, language)?;
        let outcome = service.execute(job.request).await;
        self.complete(log, job.id, outcome)
    }
}
