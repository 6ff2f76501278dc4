use axum::{
    routing::{get, post},
    Router,
};

use shared_database::ClinicState;

use crate::handlers;

pub fn doctor_routes(state: ClinicState) -> Router {
    Router::new()
        .route("/analyze-symptoms", post(handlers::analyze_symptoms))
        .route("/doctors/online", get(handlers::list_doctors_by_status))
        .with_state(state)
}
