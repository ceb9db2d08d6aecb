// Chat relay handler

use axum::{extract::Json, extract::State, http::StatusCode, response::IntoResponse, response::Response};
use tracing::error;

use relay_types::protocol::relay::{ChatFailureResponse, ChatRelayRequest, ChatRelayResponse};

use crate::server::AppState;

/// `POST /chat`. Any failure collapses into one generic 500 body; the cause is
/// only logged.
pub async fn handle_chat(State(state): State<AppState>, Json(body): Json<ChatRelayRequest>) -> Response {
    match state.completion.relay(&body.user_message).await {
        Ok(bot_reply) => (StatusCode::OK, Json(ChatRelayResponse { bot_reply })).into_response(),
        Err(e) => {
            error!("[Chat] Relay failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ChatFailureResponse::default())).into_response()
        },
    }
}
