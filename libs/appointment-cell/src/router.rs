// libs/appointment-cell/src/router.rs
use axum::{
    routing::{get, post},
    Router,
};

use shared_database::ClinicState;

use crate::handlers;

pub fn appointment_routes(state: ClinicState) -> Router {
    Router::new()
        .route("/book-appointment", post(handlers::book_appointment))
        .route("/appointments/{user_id}", get(handlers::get_user_appointments))
        .with_state(state)
}
