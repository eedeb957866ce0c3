//! Turns session events into printable lines.

use kodesesh_session::{EntryKind, Participant, SessionEvent, TerminalChange, TerminalEntry};

pub fn format_entry(entry: &TerminalEntry) -> String {
    match entry.kind {
        EntryKind::Input => format!("$ {}", entry.content),
        EntryKind::Output => entry.content.trim_end().to_string(),
        EntryKind::Error => format!("! {}", entry.content.trim_end()),
    }
}

pub fn format_participant(participant: &Participant, local_id: &str) -> String {
    let mut line = participant.name.clone();
    if participant.id == local_id {
        line.push_str(" (you)");
    }
    if participant.is_host {
        line.push_str(" [host]");
    }
    let mut flags = Vec::new();
    if participant.is_muted {
        flags.push("muted");
    }
    if participant.is_video_off {
        flags.push("camera off");
    }
    if participant.is_screen_sharing {
        flags.push("sharing screen");
    }
    if !flags.is_empty() {
        line.push_str(&format!(" - {}", flags.join(", ")));
    }
    line
}

pub fn render(event: &SessionEvent) -> Vec<String> {
    match event {
        SessionEvent::ConnectionChanged(connected) => {
            vec![format!("Connected: {}", if *connected { "Yes" } else { "No" })]
        }
        SessionEvent::CodeChanged(code) => {
            vec![format!("[code] buffer updated ({} lines)", code.lines().count())]
        }
        SessionEvent::LanguageChanged {
            language,
            file_name,
        } => vec![format!("[lang] {} ({file_name})", language.display_name())],
        SessionEvent::ParticipantsChanged(list) => {
            vec![format!("[who] {} in session", list.len())]
        }
        SessionEvent::TerminalChanged(change) => match change {
            TerminalChange::Appended(entries) | TerminalChange::Replaced { entries, .. } => {
                entries.iter().map(format_entry).collect()
            }
            TerminalChange::Cleared => vec!["[terminal cleared]".to_string()],
        },
        SessionEvent::ExecutionStateChanged(_) => Vec::new(),
    }
}
