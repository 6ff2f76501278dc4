use axum::{routing::get, Router};

use shared_database::ClinicState;

use crate::handlers;

pub fn health_tracker_routes(state: ClinicState) -> Router {
    Router::new()
        .route(
            "/health-tracker/{user_id}",
            get(handlers::get_health_records).post(handlers::log_health_metric),
        )
        .with_state(state)
}
