//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::error::TutorError;
use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::session::Command;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "areatutor_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "areatutor_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "areatutor_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "areatutor_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "areatutor_backend", "WebSocket disconnected");
}

async fn command(state: &AppState, session_id: &str, cmd: Command) -> Result<ServerWsMessage, TutorError> {
  let session = run_command(state, session_id, cmd).await?;
  Ok(ServerWsMessage::Session { session })
}

#[instrument(level = "info", skip(state))]
pub async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  let reply = match msg {
    ClientWsMessage::Ping => Ok(ServerWsMessage::Pong),
    ClientWsMessage::NewSession => open_session(state).await.map(|session| ServerWsMessage::Session { session }),
    ClientWsMessage::GetSession { session_id } => {
      session_view(state, &session_id).await.map(|session| ServerWsMessage::Session { session })
    }
    ClientWsMessage::CheckAnswer { session_id, answer } => {
      command(state, &session_id, Command::CheckAnswer(answer)).await
    }
    ClientWsMessage::Skip { session_id } => command(state, &session_id, Command::Skip).await,
    ClientWsMessage::Next { session_id } => command(state, &session_id, Command::Next).await,
    ClientWsMessage::StartAdaptive { session_id } => command(state, &session_id, Command::StartAdaptive).await,
    ClientWsMessage::RestartDiagnostic { session_id } => {
      command(state, &session_id, Command::RestartDiagnostic).await
    }
    ClientWsMessage::Hint { session_id } => {
      get_hint_text(state, &session_id).await.map(|text| ServerWsMessage::Hint { text })
    }
    ClientWsMessage::Diagram { session_id } => {
      get_diagram(state, &session_id).await.map(|diagram| ServerWsMessage::Diagram { diagram })
    }
    ClientWsMessage::Lesson { shape } => get_lesson(state, &shape).map(|lesson| ServerWsMessage::Lesson { lesson }),
    ClientWsMessage::EndSession { session_id } => close_session(state, &session_id)
      .await
      .map(|()| ServerWsMessage::SessionEnded { session_id }),
  };
  reply.unwrap_or_else(|e| ServerWsMessage::Error { message: error_message(state, &e) })
}
