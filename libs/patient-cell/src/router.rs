use axum::{
    routing::{get, post},
    Router,
};

use shared_database::ClinicState;

use crate::handlers::*;

pub fn patient_routes(state: ClinicState) -> Router {
    Router::new()
        .route(
            "/medical-history/{user_id}",
            get(get_medical_history).post(add_medical_history),
        )
        .route("/chat-command", post(chat_command))
        .with_state(state)
}
