use std::path::PathBuf;

use clap::Parser;

/// KodeSesh: shared code sessions from the terminal.
#[derive(Parser, Debug)]
#[command(name = "kodesesh", version, about)]
pub struct Args {
    /// Join an existing session by id. Without it the configured default
    /// session is opened and this client is the host.
    #[arg(short, long, conflicts_with = "fresh")]
    pub session: Option<String>,

    /// Host a brand-new session with a random id.
    #[arg(long)]
    pub fresh: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Display name to announce (saved to the local identity).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Relay websocket URL override.
    #[arg(long)]
    pub relay_url: Option<String>,

    /// Log filter directive override (e.g. `kodesesh=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
