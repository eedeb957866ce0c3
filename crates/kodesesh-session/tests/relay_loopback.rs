//! End-to-end session tests against a loopback websocket relay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use kodesesh_common::SessionId;
use kodesesh_session::channel::{ChannelConfig, Envelope};
use kodesesh_session::execution::{
    ExecutionError, ExecutionRequest, ExecutionResult, ExecutionService,
};
use kodesesh_session::{Identity, Language, SessionEvent, SessionHandle, SessionOptions};
use serde_json::json;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

const WAIT: Duration = Duration::from_secs(5);

/// Prints the submitted code back as stdout.
struct EchoService;

#[async_trait]
impl ExecutionService for EchoService {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult, ExecutionError> {
        Ok(ExecutionResult {
            stdout: request.code,
            ..Default::default()
        })
    }
}

fn options(url: String, supplied: Option<&str>) -> SessionOptions {
    SessionOptions {
        session_id: SessionId::from(supplied.unwrap_or("demo-session")),
        is_host: supplied.is_none(),
        initial_language: Language::JavaScript,
        channel: ChannelConfig {
            url,
            connect_timeout_secs: 5,
            heartbeat_interval_secs: 25,
        },
    }
}

async fn start(
    supplied: Option<&str>,
) -> (
    SessionHandle,
    mpsc::Receiver<SessionEvent>,
    WebSocketStream<TcpStream>,
) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());

    let (handle, events) = SessionHandle::connect(
        Identity::new("me", "Ada"),
        options(url, supplied),
        Arc::new(EchoService),
    );

    let (tcp, _) = timeout(WAIT, listener.accept()).await.unwrap().unwrap();
    let ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
    (handle, events, ws)
}

async fn next_frame(ws: &mut WebSocketStream<TcpStream>) -> Envelope {
    loop {
        let msg = timeout(WAIT, ws.next()).await.unwrap().unwrap().unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

async fn send_frame(ws: &mut WebSocketStream<TcpStream>, event: &str, data: serde_json::Value) {
    let text = serde_json::to_string(&Envelope {
        event: event.to_string(),
        data,
    })
    .unwrap();
    ws.send(Message::Text(text.into())).await.unwrap();
}

async fn wait_for<F>(events: &mut mpsc::Receiver<SessionEvent>, mut pred: F) -> SessionEvent
where
    F: FnMut(&SessionEvent) -> bool,
{
    loop {
        let event = timeout(WAIT, events.recv()).await.unwrap().unwrap();
        if pred(&event) {
            return event;
        }
    }
}

async fn skip_announce(ws: &mut WebSocketStream<TcpStream>) {
    for _ in 0..4 {
        next_frame(ws).await;
    }
}

#[tokio::test]
async fn connect_announces_then_requests_state() {
    let (handle, mut events, mut ws) = start(None).await;

    let mut names = Vec::new();
    let mut frames = Vec::new();
    for _ in 0..4 {
        let frame = next_frame(&mut ws).await;
        names.push(frame.event.clone());
        frames.push(frame);
    }
    assert_eq!(
        names,
        ["joinSession", "userJoined", "getParticipants", "getLanguageState"]
    );
    assert_eq!(frames[0].data, json!("demo-session"));
    assert_eq!(
        frames[1].data,
        json!({"userId": "me", "name": "Ada", "isHost": true, "sessionId": "demo-session"})
    );

    wait_for(&mut events, |e| *e == SessionEvent::ConnectionChanged(true)).await;
    handle.disconnect().await;
}

#[tokio::test]
async fn joining_supplied_session_is_not_host() {
    let (handle, _events, mut ws) = start(Some("room-42")).await;

    let join = next_frame(&mut ws).await;
    assert_eq!(join.data, json!("room-42"));
    let announce = next_frame(&mut ws).await;
    assert_eq!(announce.data["isHost"], json!(false));

    handle.disconnect().await;
}

#[tokio::test]
async fn new_participant_gets_peer_invite() {
    let (handle, mut events, mut ws) = start(None).await;
    skip_announce(&mut ws).await;

    send_frame(&mut ws, "participantJoined", json!({"id": 7, "name": "Bob"})).await;
    let invite = next_frame(&mut ws).await;
    assert_eq!(invite.event, "rtcNewParticipant");
    assert_eq!(
        invite.data,
        json!({"sessionId": "demo-session", "participantId": "7"})
    );

    let SessionEvent::ParticipantsChanged(list) =
        wait_for(&mut events, |e| matches!(e, SessionEvent::ParticipantsChanged(_))).await
    else {
        unreachable!();
    };
    let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["me", "7"]);

    handle.disconnect().await;
}

#[tokio::test]
async fn local_edit_and_run_are_published() {
    let (handle, mut events, mut ws) = start(None).await;
    skip_announce(&mut ws).await;

    handle.edit_code("console.log(5)").await.unwrap();
    let update = next_frame(&mut ws).await;
    assert_eq!(update.event, "codeUpdate");
    assert_eq!(update.data["code"], json!("console.log(5)"));
    assert_eq!(update.data["userId"], json!("me"));

    handle.run_code().await.unwrap();
    let result = next_frame(&mut ws).await;
    assert_eq!(result.event, "executionResult");
    assert_eq!(
        result.data["terminalEntries"],
        json!([
            {"type": "input", "content": "run main.js"},
            {"type": "output", "content": "console.log(5)"}
        ])
    );

    wait_for(&mut events, |e| *e == SessionEvent::ExecutionStateChanged(false)).await;
    let snapshot = handle.snapshot().await.unwrap();
    assert!(!snapshot.is_executing);
    assert_eq!(snapshot.terminal.len(), 2);

    handle.disconnect().await;
}

#[tokio::test]
async fn remote_language_update_swaps_template() {
    let (handle, mut events, mut ws) = start(None).await;
    skip_announce(&mut ws).await;

    send_frame(&mut ws, "languageUpdate", json!("python")).await;
    wait_for(&mut events, |e| matches!(e, SessionEvent::LanguageChanged { .. })).await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.language, Language::Python);
    assert_eq!(snapshot.file_name, "main.py");
    assert_eq!(snapshot.code, Language::Python.default_template());

    handle.disconnect().await;
}

#[tokio::test]
async fn disconnect_closes_socket() {
    let (handle, _events, mut ws) = start(None).await;
    skip_announce(&mut ws).await;

    let probe = handle.clone();
    handle.disconnect().await;

    loop {
        match timeout(WAIT, ws.next()).await.unwrap() {
            Some(Ok(Message::Close(_))) | None => break,
            Some(Ok(_)) => continue,
            Some(Err(e)) => panic!("unexpected socket error: {e}"),
        }
    }
    assert!(probe.snapshot().await.is_err());
}

#[tokio::test]
async fn join_flood_keeps_session_responsive() {
    const JOINS: usize = 2000;
    let (handle, _events, ws) = start(None).await;
    let (mut relay_tx, mut relay_rx) = ws.split();

    let invites = tokio::spawn(async move {
        let mut invites = 0;
        while invites < JOINS {
            match relay_rx.next().await {
                Some(Ok(Message::Text(text))) => {
                    let frame: Envelope = serde_json::from_str(&text).unwrap();
                    if frame.event == "rtcNewParticipant" {
                        invites += 1;
                    }
                }
                Some(Ok(_)) => {}
                _ => break,
            }
        }
        invites
    });

    let join = serde_json::to_string(&Envelope {
        event: "participantJoined".to_string(),
        data: json!({"id": "peer", "name": "Bob"}),
    })
    .unwrap();
    for _ in 0..JOINS {
        relay_tx.send(Message::Text(join.clone().into())).await.unwrap();
    }

    timeout(WAIT, handle.snapshot())
        .await
        .expect("snapshot during burst")
        .unwrap();
    let invited = timeout(Duration::from_secs(30), invites)
        .await
        .expect("invites forwarded")
        .unwrap();
    assert_eq!(invited, JOINS);

    let snapshot = timeout(WAIT, handle.snapshot()).await.unwrap().unwrap();
    let ids: Vec<&str> = snapshot.participants.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["me", "peer"]);

    timeout(WAIT, handle.disconnect())
        .await
        .expect("disconnect after burst");
}

#[tokio::test]
async fn disconnect_with_backlog_stops_processing() {
    let (handle, mut events, mut ws) = start(None).await;
    skip_announce(&mut ws).await;
    wait_for(&mut events, |e| *e == SessionEvent::ConnectionChanged(true)).await;

    for i in 0..500 {
        send_frame(&mut ws, "codeUpdate", json!({"code": format!("remote {i}")})).await;
    }
    timeout(WAIT, handle.disconnect())
        .await
        .expect("disconnect with queued frames");

    let late = serde_json::to_string(&Envelope {
        event: "codeUpdate".to_string(),
        data: json!("late"),
    })
    .unwrap();
    let _ = ws.send(Message::Text(late.into())).await;

    // The event stream ends once the loop has stopped.
    loop {
        match timeout(WAIT, events.recv()).await.unwrap() {
            Some(SessionEvent::CodeChanged(code)) => assert_ne!(code, "late"),
            Some(_) => {}
            None => break,
        }
    }
}

#[tokio::test]
async fn unreachable_relay_leaves_session_disconnected() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    drop(listener);

    let (handle, _events) = SessionHandle::connect(
        Identity::new("me", "Ada"),
        options(url, None),
        Arc::new(EchoService),
    );

    handle.edit_code("still editable").await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert!(!snapshot.connected);
    assert_eq!(snapshot.code, "still editable");

    handle.disconnect().await;
}
