use axum::{routing::post, Router};

use shared_database::ClinicState;

use crate::handlers;
use crate::services::resolver::SharedResolver;

#[derive(Clone)]
pub struct ChatState {
    pub clinic: ClinicState,
    pub resolver: SharedResolver,
}

pub fn chat_routes(clinic: ClinicState, resolver: SharedResolver) -> Router {
    Router::new()
        .route("/chat-reply", post(handlers::chat_reply))
        .with_state(ChatState { clinic, resolver })
}
