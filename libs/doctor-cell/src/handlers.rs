use axum::{extract::State, Json};

use shared_database::ClinicState;
use shared_models::error::AppError;
use shared_models::Doctor;

use crate::models::{AnalyzeSymptomsRequest, DoctorError, SymptomAnalysis};
use crate::services::doctor::DoctorDirectoryService;
use crate::services::matching::SymptomAnalysisService;

impl From<DoctorError> for AppError {
    fn from(e: DoctorError) -> Self {
        match e {
            DoctorError::MissingSymptoms => AppError::BadRequest(e.to_string()),
            DoctorError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn analyze_symptoms(
    State(state): State<ClinicState>,
    Json(request): Json<AnalyzeSymptomsRequest>,
) -> Result<Json<SymptomAnalysis>, AppError> {
    let symptoms = request.symptoms.unwrap_or_default();
    let service = SymptomAnalysisService::new(state.store.clone());
    let analysis = service.analyze(&symptoms).await?;
    Ok(Json(analysis))
}

#[axum::debug_handler]
pub async fn list_doctors_by_status(
    State(state): State<ClinicState>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let service = DoctorDirectoryService::new(state.store.clone());
    let doctors = service.roster_by_status().await?;
    Ok(Json(doctors))
}
