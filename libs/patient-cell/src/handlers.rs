use axum::{
    extract::{Path, State},
    Json,
};

use shared_database::ClinicState;
use shared_models::error::AppError;
use shared_models::Patient;

use crate::models::{AddHistoryRequest, ChatCommandRequest, ChatCommandResponse, PatientError};
use crate::services::patient::PatientHistoryService;

impl From<PatientError> for AppError {
    fn from(e: PatientError) -> Self {
        match e {
            PatientError::NotFound => AppError::NotFound(e.to_string()),
            PatientError::InvalidEntryType(_) | PatientError::EmptyEntry => {
                AppError::BadRequest(e.to_string())
            }
            PatientError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn get_medical_history(
    State(state): State<ClinicState>,
    Path(user_id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let service = PatientHistoryService::new(state.store.clone());
    let patient = service.get_history(&user_id).await?;
    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn add_medical_history(
    State(state): State<ClinicState>,
    Path(user_id): Path<String>,
    Json(request): Json<AddHistoryRequest>,
) -> Result<Json<Patient>, AppError> {
    let entry_type = request.entry_type.as_deref().unwrap_or_default();
    let service = PatientHistoryService::new(state.store.clone());
    let patient = service.add_entry(&user_id, entry_type, &request.entry).await?;
    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn chat_command(
    State(state): State<ClinicState>,
    Json(request): Json<ChatCommandRequest>,
) -> Result<Json<ChatCommandResponse>, AppError> {
    let message = request
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("message is required".to_string()))?;

    let user_id = state.resolve_user_id(request.user_id.as_deref());
    let service = PatientHistoryService::new(state.store.clone());
    let reply = service.chat_command(&user_id, message).await?;
    Ok(Json(ChatCommandResponse { reply }))
}
