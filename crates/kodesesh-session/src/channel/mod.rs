//! Websocket client for the relay server.
//!
//! Frames are JSON text messages shaped `{"event": .., "data": ..}`. A
//! background task owns the socket, sends heartbeats and forwards outbound
//! commands. It connects exactly once; reconnecting means a new client.

mod client;
mod connection;
mod types;

pub use client::ChannelClient;
pub use types::{ChannelConfig, ChannelEvent, Envelope};
