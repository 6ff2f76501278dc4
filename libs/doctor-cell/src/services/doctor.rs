use shared_database::SharedStore;
use shared_models::Doctor;

use crate::models::DoctorError;

pub struct DoctorDirectoryService {
    store: SharedStore,
}

impl DoctorDirectoryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Full roster for the tele-consultation page, offline doctors first.
    pub async fn roster_by_status(&self) -> Result<Vec<Doctor>, DoctorError> {
        let mut doctors = self
            .store
            .list_doctors()
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        doctors.sort_by(|a, b| a.status.cmp(&b.status).then_with(|| a.name.cmp(&b.name)));
        Ok(doctors)
    }
}
