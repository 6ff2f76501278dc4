use tracing::debug;

use shared_database::SharedStore;
use shared_models::SymptomMapping;

use crate::models::{DoctorError, SymptomAnalysis};

pub const DEFAULT_SPECIALTY: &str = "General Physician";

/// First mapping (in store order) whose keyword occurs in the text wins.
pub fn match_specialty(mappings: &[SymptomMapping], symptoms: &str) -> String {
    let lower = symptoms.to_lowercase();
    mappings
        .iter()
        .find(|mapping| mapping.matches(&lower))
        .map(|mapping| mapping.specialist.clone())
        .unwrap_or_else(|| DEFAULT_SPECIALTY.to_string())
}

pub struct SymptomAnalysisService {
    store: SharedStore,
}

impl SymptomAnalysisService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn analyze(&self, symptoms: &str) -> Result<SymptomAnalysis, DoctorError> {
        if symptoms.trim().is_empty() {
            return Err(DoctorError::MissingSymptoms);
        }

        let mappings = self
            .store
            .list_symptom_mappings()
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        let specialty = match_specialty(&mappings, symptoms);
        debug!("Symptoms '{}' routed to {}", symptoms, specialty);

        let doctors = self
            .store
            .find_doctors_by_specialization(&specialty)
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        Ok(SymptomAnalysis { specialty, doctors })
    }
}
