//! Public handle for the relay connection.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use super::connection::connection_loop;
use super::types::{ChannelCommand, ChannelConfig, ChannelEvent};

/// Handle for one relay connection.
///
/// Methods queue commands for the background connection task and never
/// wait, so a caller that is also draining the event receiver cannot stall
/// on a full queue. Dropping every handle closes the connection.
pub struct ChannelClient {
    command_tx: mpsc::UnboundedSender<ChannelCommand>,
    connected: Arc<RwLock<bool>>,
}

impl ChannelClient {
    /// Start the background connection. Returns `(client, event_receiver)`.
    pub fn connect(config: ChannelConfig) -> (Self, mpsc::Receiver<ChannelEvent>) {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let connected = Arc::new(RwLock::new(false));

        let client = Self {
            command_tx,
            connected: Arc::clone(&connected),
        };

        tokio::spawn(connection_loop(config, connected, event_tx, command_rx));

        (client, event_rx)
    }

    /// Publish an event. Dropped if the connection task has already exited.
    pub fn emit(&self, event: &str, data: serde_json::Value) {
        let _ = self.command_tx.send(ChannelCommand::Emit {
            event: event.to_string(),
            data,
        });
    }

    pub async fn is_connected(&self) -> bool {
        *self.connected.read().await
    }

    /// Close the socket and stop the connection task.
    pub fn disconnect(&self) {
        let _ = self.command_tx.send(ChannelCommand::Disconnect);
    }
}
