use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use appointment_cell::appointment_routes;
use chat_cell::{chat_routes, SharedResolver};
use doctor_cell::doctor_routes;
use health_tracker_cell::health_tracker_routes;
use patient_cell::patient_routes;
use shared_database::ClinicState;

async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello World! The backend is working!" }))
}

pub fn create_router(state: ClinicState, resolver: SharedResolver) -> Router {
    let api = Router::new()
        .route("/hello", get(hello))
        .merge(chat_routes(state.clone(), resolver))
        .merge(doctor_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(patient_routes(state.clone()))
        .merge(health_tracker_routes(state));

    Router::new()
        .route("/", get(|| async { "Apo-Bot API is running!" }))
        .nest("/api", api)
}
