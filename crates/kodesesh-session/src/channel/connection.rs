//! Background websocket task: one connect attempt, then a single select loop
//! over inbound frames, outbound commands, and the heartbeat.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, RwLock};
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, warn};

use super::types::{ChannelCommand, ChannelConfig, ChannelEvent, Envelope};

pub(crate) async fn connection_loop(
    config: ChannelConfig,
    connected: Arc<RwLock<bool>>,
    event_tx: mpsc::Sender<ChannelEvent>,
    mut command_rx: mpsc::UnboundedReceiver<ChannelCommand>,
) {
    info!(url = %config.url, "Connecting to relay");

    let timeout = Duration::from_secs(config.connect_timeout_secs);
    let ws_stream = match tokio::time::timeout(
        timeout,
        tokio_tungstenite::connect_async(config.url.as_str()),
    )
    .await
    {
        Ok(Ok((ws_stream, _))) => ws_stream,
        Ok(Err(e)) => {
            error!(error = %e, "Failed to connect to relay");
            let _ = event_tx
                .send(ChannelEvent::Error(format!("Connection failed: {e}")))
                .await;
            return;
        }
        Err(_elapsed) => {
            error!(
                timeout_secs = config.connect_timeout_secs,
                "Relay connection timed out"
            );
            let _ = event_tx
                .send(ChannelEvent::Error(format!(
                    "Connection timed out after {}s",
                    config.connect_timeout_secs
                )))
                .await;
            return;
        }
    };

    *connected.write().await = true;
    let _ = event_tx.send(ChannelEvent::Connected).await;
    info!("Connected to relay");

    let (mut ws_write, mut ws_read) = ws_stream.split();
    let period = Duration::from_secs(config.heartbeat_interval_secs.max(1));
    let mut heartbeat = tokio::time::interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            frame = ws_read.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => match serde_json::from_str::<Envelope>(&text) {
                    Ok(envelope) => {
                        let event = ChannelEvent::Message {
                            event: envelope.event,
                            data: envelope.data,
                        };
                        if event_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => debug!(error = %e, "Unrecognized frame from relay"),
                },
                Some(Ok(WsMessage::Close(_))) => {
                    info!("Relay closed connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "WebSocket error");
                    let _ = event_tx.send(ChannelEvent::Error(e.to_string())).await;
                    break;
                }
                None => break,
            },
            command = command_rx.recv() => match command {
                Some(ChannelCommand::Emit { event, data }) => {
                    let envelope = Envelope { event, data };
                    let json = match serde_json::to_string(&envelope) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(event = %envelope.event, error = %e, "Failed to encode frame");
                            continue;
                        }
                    };
                    if let Err(e) = ws_write.send(WsMessage::Text(json.into())).await {
                        warn!(error = %e, "Failed to send frame");
                        break;
                    }
                }
                Some(ChannelCommand::Disconnect) | None => break,
            },
            _ = heartbeat.tick() => {
                if ws_write.send(WsMessage::Ping(Default::default())).await.is_err() {
                    break;
                }
            }
        }
    }

    // Also reached when the event receiver is gone; the relay still gets a
    // close frame.
    let _ = ws_write.send(WsMessage::Close(None)).await;
    *connected.write().await = false;
    let _ = event_tx.send(ChannelEvent::Disconnected).await;
    info!("Disconnected from relay");
}
