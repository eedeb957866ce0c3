//! Cloneable front-end handle to a running session.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::runtime::SessionRuntime;
use super::state::SessionState;
use super::types::{LocalAction, SessionCommand, SessionError, SessionEvent, SessionOptions, SessionSnapshot};
use crate::channel::ChannelClient;
use crate::execution::ExecutionService;
use crate::identity::Identity;

/// Handle for one connected session.
///
/// Every method sends a command to the session loop. Once the loop is gone
/// they return [`SessionError::Closed`].
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionCommand>,
    cancel: CancellationToken,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SessionHandle {
    /// Open the relay connection and start the session loop.
    /// Returns `(handle, event_receiver)`.
    pub fn connect(
        identity: Identity,
        options: SessionOptions,
        service: Arc<dyn ExecutionService>,
    ) -> (Self, mpsc::Receiver<SessionEvent>) {
        info!(
            session_id = %options.session_id,
            user_id = %identity.user_id,
            is_host = options.is_host,
            "Opening session"
        );

        let (event_tx, event_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(64);
        let (channel, channel_rx) = ChannelClient::connect(options.channel);

        let state = SessionState::new(
            identity,
            options.session_id,
            options.is_host,
            options.initial_language,
        );
        let runtime = SessionRuntime {
            state,
            channel,
            channel_rx,
            service,
            command_rx,
            event_tx,
        };

        let cancel = CancellationToken::new();
        let task = tokio::spawn(runtime.run(cancel.clone()));

        let handle = Self {
            command_tx,
            cancel,
            task: Arc::new(Mutex::new(Some(task))),
        };
        (handle, event_rx)
    }

    async fn send(&self, action: LocalAction) -> Result<(), SessionError> {
        self.command_tx
            .send(SessionCommand::Action(action))
            .await
            .map_err(|_| SessionError::Closed)
    }

    pub async fn edit_code(&self, code: impl Into<String>) -> Result<(), SessionError> {
        self.send(LocalAction::EditCode(code.into())).await
    }

    /// Switch language by wire name. Unsupported names are ignored.
    pub async fn select_language(&self, language: &str) -> Result<(), SessionError> {
        self.send(LocalAction::SelectLanguage(language.to_string()))
            .await
    }

    pub async fn toggle_audio(&self) -> Result<(), SessionError> {
        self.send(LocalAction::ToggleAudio).await
    }

    pub async fn toggle_video(&self) -> Result<(), SessionError> {
        self.send(LocalAction::ToggleVideo).await
    }

    pub async fn set_screen_sharing(&self, on: bool) -> Result<(), SessionError> {
        self.send(LocalAction::SetScreenSharing(on)).await
    }

    /// Run the current buffer. Ignored while a run is in flight.
    pub async fn run_code(&self) -> Result<(), SessionError> {
        self.send(LocalAction::RunCode).await
    }

    pub async fn clear_terminal(&self) -> Result<(), SessionError> {
        self.send(LocalAction::ClearTerminal).await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(SessionCommand::Snapshot(reply_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    /// Stop the session loop, close the relay connection and wait for the
    /// loop to finish. Events still queued are dropped.
    pub async fn disconnect(self) {
        self.cancel.cancel();
        let task = self.task.lock().await.take();
        if let Some(task) = task {
            let _ = task.await;
        }
        info!("Session disconnected");
    }
}
