use serde::{Deserialize, Serialize};

use shared_models::Doctor;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeSymptomsRequest {
    pub symptoms: Option<String>,
}

/// The chosen specialty and every doctor practising it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    pub specialty: String,
    pub doctors: Vec<Doctor>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DoctorError {
    #[error("Symptoms are required")]
    MissingSymptoms,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
