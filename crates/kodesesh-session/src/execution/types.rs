use crate::language::Language;
use crate::terminal::TerminalEntry;

/// One run request: the full buffer in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub language: Language,
    pub code: String,
}

/// Outcome of a run that reached the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i64,
}

impl ExecutionResult {
    /// Terminal entries for this result: stdout then stderr, skipping
    /// whichever is empty.
    pub fn into_entries(self) -> Vec<TerminalEntry> {
        let mut entries = Vec::with_capacity(2);
        if !self.stdout.is_empty() {
            entries.push(TerminalEntry::output(self.stdout));
        }
        if !self.stderr.is_empty() {
            entries.push(TerminalEntry::error(self.stderr));
        }
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API responded with status: {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    Malformed(String),
}
