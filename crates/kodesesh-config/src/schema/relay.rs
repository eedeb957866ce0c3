use serde::{Deserialize, Serialize};

/// Connection settings for the real-time relay server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// WebSocket URL of the relay server.
    pub url: String,
    /// Seconds to wait for the websocket handshake (valid range: 1-120).
    pub connect_timeout: u32,
    /// Seconds between websocket pings (valid range: 5-300).
    pub heartbeat_interval: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:5000/ws".into(),
            connect_timeout: 15,
            heartbeat_interval: 25,
        }
    }
}
