//! Configuration, envelope, and event/command enums for the channel client.

use kodesesh_config::RelayConfig;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Relay websocket URL (`ws://` or `wss://`).
    pub url: String,
    /// Handshake timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Seconds between websocket pings.
    pub heartbeat_interval_secs: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::from(&RelayConfig::default())
    }
}

impl From<&RelayConfig> for ChannelConfig {
    fn from(config: &RelayConfig) -> Self {
        Self {
            url: config.url.clone(),
            connect_timeout_secs: u64::from(config.connect_timeout),
            heartbeat_interval_secs: u64::from(config.heartbeat_interval),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire envelope
// ---------------------------------------------------------------------------

/// One relay frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Events & Commands
// ---------------------------------------------------------------------------

/// Events emitted by the channel client.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// Websocket handshake completed.
    Connected,
    /// Connection closed, by either side.
    Disconnected,
    /// An application event from the relay.
    Message {
        event: String,
        data: serde_json::Value,
    },
    /// Connect failure or socket error.
    Error(String),
}

#[derive(Debug)]
pub(crate) enum ChannelCommand {
    Emit {
        event: String,
        data: serde_json::Value,
    },
    Disconnect,
}
