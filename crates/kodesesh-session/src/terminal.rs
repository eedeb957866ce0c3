//! Shared terminal log.
//!
//! Entries are append-only. The one exception is the transient progress
//! marker written while a local execution is in flight, which is swapped
//! for the real result once it is known.

use serde::{Deserialize, Serialize};

/// Text of the marker shown while an execution is running.
pub const PROGRESS_MESSAGE: &str = "Executing code...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Input,
    Output,
    Error,
}

/// One line of terminal history. Serialized as `{"type": .., "content": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub content: String,
}

impl TerminalEntry {
    pub fn input(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Input,
            content: content.into(),
        }
    }

    pub fn output(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Output,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Error,
            content: content.into(),
        }
    }
}

/// One change to the log, as reported to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalChange {
    /// Entries added at the end.
    Appended(Vec<TerminalEntry>),
    /// The single entry at `at` was replaced by `entries`.
    Replaced { at: usize, entries: Vec<TerminalEntry> },
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct TerminalLog {
    entries: Vec<TerminalEntry>,
    /// Slot of the progress marker, if one is showing.
    progress_slot: Option<usize>,
}

impl TerminalLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TerminalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, entry: TerminalEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = TerminalEntry>) {
        self.entries.extend(entries);
    }

    pub fn has_progress(&self) -> bool {
        self.progress_slot.is_some()
    }

    /// Append the progress marker and remember where it sits.
    pub fn begin_progress(&mut self) {
        self.progress_slot = Some(self.entries.len());
        self.entries.push(TerminalEntry::output(PROGRESS_MESSAGE));
    }

    /// Replace the progress marker with `entries`.
    ///
    /// Entries appended after the marker (remote results that arrived while
    /// waiting) stay after the replacement. Without a marker the entries are
    /// appended.
    pub fn resolve_progress(&mut self, entries: Vec<TerminalEntry>) -> TerminalChange {
        match self.progress_slot.take() {
            Some(slot) if slot < self.entries.len() => {
                self.entries.splice(slot..=slot, entries.iter().cloned());
                TerminalChange::Replaced { at: slot, entries }
            }
            _ => {
                self.entries.extend(entries.iter().cloned());
                TerminalChange::Appended(entries)
            }
        }
    }

    /// Drop the whole history, including any progress marker.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.progress_slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_kind_as_type() {
        let json = serde_json::to_value(TerminalEntry::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "error", "content": "boom"}));
    }

    #[test]
    fn progress_marker_is_replaced_in_place() {
        let mut log = TerminalLog::new();
        log.append(TerminalEntry::input("run main.js"));
        log.begin_progress();
        assert_eq!(log.entries()[1].content, PROGRESS_MESSAGE);

        let change = log.resolve_progress(vec![TerminalEntry::output("5")]);
        assert_eq!(
            change,
            TerminalChange::Replaced {
                at: 1,
                entries: vec![TerminalEntry::output("5")]
            }
        );
        assert_eq!(
            log.entries(),
            &[TerminalEntry::input("run main.js"), TerminalEntry::output("5")]
        );
        assert!(!log.has_progress());
    }

    #[test]
    fn remote_entries_after_marker_are_kept() {
        let mut log = TerminalLog::new();
        log.append(TerminalEntry::input("run main.py"));
        log.begin_progress();
        log.extend([TerminalEntry::input("run main.js"), TerminalEntry::output("hi")]);

        log.resolve_progress(vec![
            TerminalEntry::output("42"),
            TerminalEntry::error("warning"),
        ]);

        let contents: Vec<&str> = log.entries().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(
            contents,
            ["run main.py", "42", "warning", "run main.js", "hi"]
        );
    }

    #[test]
    fn resolving_with_no_entries_removes_marker() {
        let mut log = TerminalLog::new();
        log.begin_progress();
        log.resolve_progress(Vec::new());
        assert!(log.is_empty());
    }

    #[test]
    fn resolve_after_clear_appends() {
        let mut log = TerminalLog::new();
        log.begin_progress();
        log.clear();
        let change = log.resolve_progress(vec![TerminalEntry::output("late")]);
        assert_eq!(change, TerminalChange::Appended(vec![TerminalEntry::output("late")]));
        assert_eq!(log.entries(), &[TerminalEntry::output("late")]);
    }
}
