//! WebSocket streaming of analysis traces.

use crate::state::AppState;
use axum::extract::State;
use axum::extract::ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use chrono::Utc;
use futures_util::StreamExt;
use insight_rs_protocol::{AnalysisStatus, ClientMessage, StreamMessage};
use log::{debug, info, warn};
use std::collections::VecDeque;

pub(crate) async fn analyze_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Whether the client is still there after a streamed analysis.
enum Connection {
    Open,
    Closed,
}

/// Serve queries one at a time until the client goes away.
///
/// Frames that arrive while an analysis is streaming are queued and served
/// in order afterwards.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    info!("websocket client connected");
    let mut queued: VecDeque<Utf8Bytes> = VecDeque::new();
    loop {
        let text = match queued.pop_front() {
            Some(text) => text,
            None => match socket.recv().await {
                Some(Ok(Message::Text(text))) => text,
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => continue,
                Some(Err(err)) => {
                    warn!("websocket receive failed (error={})", err);
                    break;
                }
            },
        };
        let query = match serde_json::from_str::<ClientMessage>(text.as_str()) {
            Ok(ClientMessage::Query { query }) if !query.trim().is_empty() => query,
            Ok(ClientMessage::Query { .. }) => {
                let reply = error_message("query must not be empty");
                if send(&mut socket, &reply).await.is_err() {
                    break;
                }
                continue;
            }
            Err(err) => {
                debug!("malformed client frame (len={}, error={})", text.as_str().len(), err);
                let reply = error_message(format!("invalid message: {err}"));
                if send(&mut socket, &reply).await.is_err() {
                    break;
                }
                continue;
            }
        };
        match stream_analysis(&mut socket, &state, query, &mut queued).await {
            Ok(Connection::Open) => {}
            Ok(Connection::Closed) => break,
            Err(err) => {
                debug!("websocket transport failed (error={})", err);
                break;
            }
        }
    }
    info!("websocket client disconnected");
}

/// `start`, one `thought` per step, then `complete` or `error`.
///
/// The socket is read while steps stream so a disconnect is noticed at once.
/// Returning early drops the step stream, which cancels the analysis before
/// it reaches history.
async fn stream_analysis(
    socket: &mut WebSocket,
    state: &AppState,
    query: String,
    queued: &mut VecDeque<Utf8Bytes>,
) -> Result<Connection, axum::Error> {
    send(
        socket,
        &StreamMessage::Start {
            query: query.clone(),
            timestamp: Utc::now(),
        },
    )
    .await?;

    let (mut steps, completion) = state.hub.analyze_stream(query).into_parts();
    let analysis_id = completion.analysis_id;
    loop {
        tokio::select! {
            step = steps.next() => match step {
                Some(step) => send(socket, &StreamMessage::Thought { data: step }).await?,
                None => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => queued.push_back(text),
                Some(Ok(Message::Close(_))) | None => {
                    info!("client left mid-analysis (analysis_id={})", analysis_id);
                    return Ok(Connection::Closed);
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err),
            },
        }
    }

    let terminal = match completion.finish().await {
        Ok(analysis) if analysis.status == AnalysisStatus::Completed => StreamMessage::Complete {
            data: Box::new(analysis),
        },
        Ok(analysis) => StreamMessage::Error {
            message: analysis
                .error
                .unwrap_or_else(|| "analysis failed".to_string()),
            analysis_id: Some(analysis.id),
        },
        Err(err) => StreamMessage::Error {
            message: err.to_string(),
            analysis_id: Some(analysis_id),
        },
    };
    send(socket, &terminal).await?;
    Ok(Connection::Open)
}

fn error_message(message: impl Into<String>) -> StreamMessage {
    StreamMessage::Error {
        message: message.into(),
        analysis_id: None,
    }
}

async fn send(socket: &mut WebSocket, message: &StreamMessage) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(message).map_err(axum::Error::new)?;
    socket.send(Message::Text(payload.into())).await
}
