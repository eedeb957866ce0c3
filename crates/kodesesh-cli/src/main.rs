//! kodesesh: line-oriented terminal client for shared code sessions.
//!
//! Connects to the relay, prints session changes as they happen and reads
//! slash commands from stdin.

mod cli;
mod commands;
mod render;

use std::sync::Arc;

use kodesesh_common::{KodeseshError, SessionId};
use kodesesh_config::KodeseshConfig;
use kodesesh_session::{
    Identity, IdentityStore, PistonClient, PistonConfig, SessionError, SessionHandle,
    SessionOptions,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::commands::{Command, HELP};
use crate::render::{format_entry, format_participant};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // Config is read before logging so its level can seed the filter.
    let loaded = match &args.config {
        Some(path) => kodesesh_config::load_config_from(path),
        None => kodesesh_config::load_config(),
    };

    let log_directive = args
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.logging.level.as_directive().to_string()))
        .unwrap_or_else(|| "kodesesh=info".to_string());
    let filter = EnvFilter::try_new(&log_directive).unwrap_or_else(|_| EnvFilter::new("kodesesh=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("kodesesh v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        KodeseshConfig::default()
    });

    if let Err(e) = run(args, config).await {
        tracing::error!(error = %e, "kodesesh exited with an error");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args, mut config: KodeseshConfig) -> Result<(), KodeseshError> {
    if let Some(url) = &args.relay_url {
        config.relay.url = url.clone();
    }

    let identity = resolve_identity(&config, args.name.as_deref())
        .map_err(|e| KodeseshError::Identity(e.to_string()))?;

    let mut options = SessionOptions::from_config(&config, args.session.map(SessionId::from));
    if args.fresh {
        options.session_id = SessionId::generate();
    }
    println!(
        "Session {} as {}{}",
        options.session_id,
        identity.display_name,
        if options.is_host { " (host)" } else { "" }
    );

    let service = PistonClient::new(PistonConfig::from(&config.execution))
        .map_err(|e| KodeseshError::Network(e.to_string()))?;
    let (handle, mut events) = SessionHandle::connect(identity, options, Arc::new(service));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Type /help for commands.");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    for line in render::render(&event) {
                        println!("{line}");
                    }
                }
                None => break,
            },
            line = lines.next_line() => match line? {
                Some(line) => match commands::parse(&line) {
                    None => {}
                    Some(Ok(Command::Quit)) => break,
                    Some(Ok(command)) => {
                        if let Err(e) = dispatch(&handle, command).await {
                            match e {
                                SessionError::Closed => break,
                                other => eprintln!("{other}"),
                            }
                        }
                    }
                    Some(Err(e)) => eprintln!("{e}"),
                },
                None => break,
            },
        }
    }

    handle.disconnect().await;
    Ok(())
}

/// The stored identity, renamed if `name` is given.
fn resolve_identity(config: &KodeseshConfig, name: Option<&str>) -> Result<Identity, SessionError> {
    let store = IdentityStore::from_config(&config.identity)?;
    let identity = match name {
        Some(name) => store.set_display_name(name)?,
        None => store.load_or_create(&config.identity.default_name)?,
    };
    tracing::debug!(path = %store.path().display(), user_id = %identity.user_id, "Identity loaded");
    Ok(identity)
}

async fn dispatch(handle: &SessionHandle, command: Command) -> Result<(), SessionError> {
    match command {
        Command::Run => handle.run_code().await?,
        Command::Lang(name) => handle.select_language(&name).await?,
        Command::Mute => handle.toggle_audio().await?,
        Command::Video => handle.toggle_video().await?,
        Command::Share(on) => handle.set_screen_sharing(on).await?,
        Command::Load(path) => match tokio::fs::read_to_string(&path).await {
            Ok(code) => handle.edit_code(code).await?,
            Err(e) => eprintln!("cannot read {}: {e}", path.display()),
        },
        Command::Code => {
            let snapshot = handle.snapshot().await?;
            println!("--- {} ---", snapshot.file_name);
            println!("{}", snapshot.code);
        }
        Command::Who => {
            let snapshot = handle.snapshot().await?;
            for participant in &snapshot.participants {
                println!("{}", format_participant(participant, &snapshot.user_id));
            }
        }
        Command::Log => {
            let snapshot = handle.snapshot().await?;
            for entry in &snapshot.terminal {
                println!("{}", format_entry(entry));
            }
        }
        Command::Clear => handle.clear_terminal().await?,
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}
