// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_database::ClinicState;
use shared_models::error::AppError;
use shared_models::Appointment;

use crate::models::{AppointmentError, BookAppointmentRequest, BookAppointmentResponse};
use crate::services::booking::AppointmentBookingService;

impl From<AppointmentError> for AppError {
    fn from(e: AppointmentError) -> Self {
        match e {
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::SlotUnavailable { .. } => AppError::Conflict(e.to_string()),
            AppointmentError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<ClinicState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<BookAppointmentResponse>), AppError> {
    let (doctor_name, slot_iso) = match (request.doctor_name.as_deref(), request.slot_iso.as_deref()) {
        (Some(doctor), Some(slot)) if !doctor.trim().is_empty() && !slot.trim().is_empty() => {
            (doctor, slot)
        }
        _ => {
            return Err(AppError::ValidationError(
                "doctorName and slotISO are required".to_string(),
            ))
        }
    };

    let user_id = state.resolve_user_id(request.user_id.as_deref());
    let booking_service = AppointmentBookingService::new(state.store.clone());

    let appointment = booking_service.book_slot(doctor_name, slot_iso, &user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookAppointmentResponse {
            message: "Appointment booked successfully!".to_string(),
            appointment,
        }),
    ))
}

#[axum::debug_handler]
pub async fn get_user_appointments(
    State(state): State<ClinicState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointments = booking_service.appointments_for(&user_id).await?;
    Ok(Json(appointments))
}
