//! The session loop: the one task that owns [`SessionState`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::state::SessionState;
use super::types::{Effect, SessionCommand, SessionEvent};
use crate::channel::{ChannelClient, ChannelEvent};
use crate::execution::{ExecutionError, ExecutionResult, ExecutionService};
use crate::protocol::InboundEvent;

type Completion = (u64, Result<ExecutionResult, ExecutionError>);

pub(crate) struct SessionRuntime {
    pub(crate) state: SessionState,
    pub(crate) channel: ChannelClient,
    pub(crate) channel_rx: mpsc::Receiver<ChannelEvent>,
    pub(crate) service: Arc<dyn ExecutionService>,
    pub(crate) command_rx: mpsc::Receiver<SessionCommand>,
    pub(crate) event_tx: mpsc::Sender<SessionEvent>,
}

impl SessionRuntime {
    /// Process commands, relay events and execution completions one at a
    /// time until cancelled, every handle is dropped, or nothing is left.
    pub(crate) async fn run(mut self, cancel: CancellationToken) {
        let (done_tx, mut done_rx) = mpsc::channel::<Completion>(4);
        let mut channel_open = true;

        loop {
            let effects = tokio::select! {
                biased;

                _ = cancel.cancelled() => break,

                command = self.command_rx.recv() => match command {
                    Some(SessionCommand::Action(action)) => {
                        debug!(?action, "Local action");
                        self.state.handle_action(action)
                    }
                    Some(SessionCommand::Snapshot(reply)) => {
                        let _ = reply.send(self.state.snapshot());
                        continue;
                    }
                    None => break,
                },

                event = self.channel_rx.recv(), if channel_open => match event {
                    Some(ChannelEvent::Connected) => self.state.on_connected(),
                    Some(ChannelEvent::Disconnected) => self.state.on_disconnected(),
                    Some(ChannelEvent::Message { event, data }) => {
                        match InboundEvent::decode(&event, data) {
                            Some(inbound) => {
                                debug!(event = %event, "Dispatching relay event");
                                self.state.handle_inbound(inbound)
                            }
                            None => continue,
                        }
                    }
                    Some(ChannelEvent::Error(message)) => {
                        warn!(%message, "Relay channel error");
                        continue;
                    }
                    None => {
                        channel_open = false;
                        self.state.on_disconnected()
                    }
                },

                Some((job_id, outcome)) = done_rx.recv() => {
                    self.state.complete_execution(job_id, outcome)
                }
            };

            self.apply(effects, &done_tx).await;
        }

        self.channel.disconnect();
        info!("Session loop stopped");
    }

    async fn apply(&self, effects: Vec<Effect>, done_tx: &mpsc::Sender<Completion>) {
        for effect in effects {
            match effect {
                Effect::Publish(event) => {
                    self.channel.emit(event.name(), event.payload());
                }
                Effect::Execute(job) => {
                    let service = Arc::clone(&self.service);
                    let done_tx = done_tx.clone();
                    tokio::spawn(async move {
                        let outcome = service.execute(job.request).await;
                        let _ = done_tx.send((job.id, outcome)).await;
                    });
                }
                Effect::Notify(event) => {
                    if self.event_tx.try_send(event).is_err() {
                        debug!("Front end not keeping up; dropped session event");
                    }
                }
            }
        }
    }
}
