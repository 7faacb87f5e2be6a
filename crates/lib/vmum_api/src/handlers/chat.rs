//! Chat request handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use vmum_core::chat::{ChatReply, ChatRequest};

use crate::AppState;
use crate::error::{AppError, AppResult};

/// `POST /chat` — relay one message (plus recent history) to the model.
///
/// The body is parsed as JSON regardless of `Content-Type`; some embedded
/// web views post JSON as `text/plain`. An empty body is treated as `{}` so
/// it reports the missing message rather than a parse failure.
pub async fn chat_handler(State(state): State<AppState>, body: Bytes) -> AppResult<Json<ChatReply>> {
    let request = parse_request(&body)?;
    let reply = state.relay.handle(request).await?;
    Ok(Json(ChatReply { reply }))
}

fn parse_request(body: &[u8]) -> AppResult<ChatRequest> {
    if body.trim_ascii().is_empty() {
        return Ok(ChatRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))
}
