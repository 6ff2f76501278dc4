use axum::{extract::State, Json};
use tracing::error;

use crate::models::{ChatError, ChatReplyRequest, ChatReplyResponse};
use crate::router::ChatState;
use crate::services::dispatcher::ActionDispatcher;

#[axum::debug_handler]
pub async fn chat_reply(
    State(state): State<ChatState>,
    Json(request): Json<ChatReplyRequest>,
) -> Result<Json<ChatReplyResponse>, ChatError> {
    if request.chat_history.is_empty() {
        return Err(ChatError::MissingHistory);
    }

    let user_id = state.clinic.resolve_user_id(request.user_id.as_deref());
    let dispatcher = ActionDispatcher::new(state.clinic.store.clone(), state.resolver.clone());

    let reply = dispatcher
        .reply(&user_id, &request.chat_history)
        .await
        .inspect_err(|e| error!("Error in chat-reply action handler: {}", e))?;

    Ok(Json(ChatReplyResponse { reply }))
}
