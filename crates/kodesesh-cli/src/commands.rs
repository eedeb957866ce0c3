//! Parsing of the slash commands typed at the prompt.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run,
    Lang(String),
    Mute,
    Video,
    Share(bool),
    Load(PathBuf),
    Code,
    Who,
    Log,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try /help)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
/run              run the shared buffer
/lang <name>      switch language (javascript, python)
/mute             toggle microphone
/video            toggle camera
/share on|off     start or stop screen sharing
/load <path>      replace the buffer with a file
/code             print the buffer
/who              list participants
/log              print the terminal log
/clear            clear the terminal log
/quit             leave the session";

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Option<Result<Command, CommandError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name {
        "/run" => Ok(Command::Run),
        "/lang" if rest.is_empty() => Err(CommandError::Usage("/lang <name>")),
        "/lang" => Ok(Command::Lang(rest.to_string())),
        "/mute" => Ok(Command::Mute),
        "/video" => Ok(Command::Video),
        "/share" => match rest {
            "on" => Ok(Command::Share(true)),
            "off" => Ok(Command::Share(false)),
            _ => Err(CommandError::Usage("/share on|off")),
        },
        "/load" if rest.is_empty() => Err(CommandError::Usage("/load <path>")),
        "/load" => Ok(Command::Load(PathBuf::from(rest))),
        "/code" => Ok(Command::Code),
        "/who" => Ok(Command::Who),
        "/log" => Ok(Command::Log),
        "/clear" => Ok(Command::Clear),
        "/help" => Ok(Command::Help),
        "/quit" | "/exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    };
    Some(command)
}
