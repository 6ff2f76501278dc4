use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use shared_models::{Appointment, Doctor, HealthRecord, HistoryField, Patient, SymptomMapping};

use crate::seed::SeedData;
use crate::store::ClinicStore;

#[derive(Debug, Default)]
struct Collections {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    symptom_map: Vec<SymptomMapping>,
    health_records: Vec<HealthRecord>,
    appointments: Vec<Appointment>,
}

/// Process-local store. All collections sit behind one lock, so every
/// mutation (the slot pull in particular) is observed all-or-nothing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_seed(seed: &SeedData) -> Self {
        let store = Self::new();
        store.load(seed).await;
        store
    }

    async fn load(&self, seed: &SeedData) {
        let mut inner = self.inner.write().await;
        *inner = Collections {
            doctors: seed.doctors.clone(),
            patients: seed.patients.clone(),
            symptom_map: seed.symptom_map.clone(),
            health_records: seed.health_records.clone(),
            appointments: Vec::new(),
        };
    }
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self.inner.read().await.doctors.clone())
    }

    async fn find_doctors_by_specialization(&self, specialization: &str) -> Result<Vec<Doctor>> {
        let inner = self.inner.read().await;
        Ok(inner
            .doctors
            .iter()
            .filter(|doctor| doctor.specialization == specialization)
            .cloned()
            .collect())
    }

    async fn find_doctor_by_name(&self, name: &str) -> Result<Option<Doctor>> {
        let inner = self.inner.read().await;
        Ok(inner.doctors.iter().find(|doctor| doctor.name == name).cloned())
    }

    async fn pull_doctor_slot(&self, doctor_name: &str, slot_iso: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;

        let doctor = inner
            .doctors
            .iter_mut()
            .find(|doctor| doctor.name == doctor_name && doctor.has_slot(slot_iso));

        match doctor {
            Some(doctor) => {
                doctor.availability.retain(|slot| slot != slot_iso);
                debug!("Pulled slot {} from {}", slot_iso, doctor_name);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_patient(&self, user_id: &str) -> Result<Option<Patient>> {
        let inner = self.inner.read().await;
        Ok(inner.patients.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn append_patient_entry(
        &self,
        user_id: &str,
        field: HistoryField,
        entry: &str,
        upsert: bool,
    ) -> Result<Option<Patient>> {
        let mut inner = self.inner.write().await;

        let index = match inner.patients.iter().position(|p| p.user_id == user_id) {
            Some(index) => index,
            None if upsert => {
                debug!("Creating patient record for {}", user_id);
                inner.patients.push(Patient::empty(user_id));
                inner.patients.len() - 1
            }
            None => return Ok(None),
        };

        let patient = &mut inner.patients[index];
        patient.entries_mut(field).push(entry.to_string());
        Ok(Some(patient.clone()))
    }

    async fn list_symptom_mappings(&self) -> Result<Vec<SymptomMapping>> {
        Ok(self.inner.read().await.symptom_map.clone())
    }

    async fn insert_health_record(&self, record: &HealthRecord) -> Result<()> {
        self.inner.write().await.health_records.push(record.clone());
        Ok(())
    }

    async fn find_health_records_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<HealthRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<HealthRecord> = inner
            .health_records
            .iter()
            .filter(|record| record.user_id == user_id && record.date >= since)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.date);
        Ok(records)
    }

    async fn insert_appointment(&self, appointment: &Appointment) -> Result<()> {
        self.inner.write().await.appointments.push(appointment.clone());
        Ok(())
    }

    async fn find_appointments(&self, user_id: &str) -> Result<Vec<Appointment>> {
        let inner = self.inner.read().await;
        let mut appointments: Vec<Appointment> = inner
            .appointments
            .iter()
            .filter(|appointment| appointment.user_id == user_id)
            .cloned()
            .collect();
        appointments.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
        Ok(appointments)
    }

    async fn reset_with(&self, seed: &SeedData) -> Result<()> {
        self.load(seed).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use futures::future::join_all;
    use shared_models::{MetricType, MetricValue};
    use uuid::Uuid;

    use super::*;

    const AISHA: &str = "Dr. Aisha Khan";
    const SLOT: &str = "2025-11-16T09:00:00Z";

    #[tokio::test]
    async fn test_pull_slot_removes_exactly_once() {
        let store = MemoryStore::with_seed(&SeedData::demo()).await;

        assert!(store.pull_doctor_slot(AISHA, SLOT).await.unwrap());
        assert!(!store.pull_doctor_slot(AISHA, SLOT).await.unwrap());

        let doctor = store.find_doctor_by_name(AISHA).await.unwrap().unwrap();
        assert!(!doctor.has_slot(SLOT));
        assert!(doctor.has_slot("2025-11-16T09:30:00Z"));
    }

    #[tokio::test]
    async fn test_pull_slot_rejects_wrong_doctor_or_unknown_slot() {
        let store = MemoryStore::with_seed(&SeedData::demo()).await;

        assert!(!store.pull_doctor_slot("Dr. Priya Gupta", SLOT).await.unwrap());
        assert!(!store.pull_doctor_slot("Dr. Nobody", SLOT).await.unwrap());
        assert!(!store.pull_doctor_slot(AISHA, "2030-01-01T00:00:00Z").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_pulls_have_single_winner() {
        let store = Arc::new(MemoryStore::with_seed(&SeedData::demo()).await);

        let attempts = (0..16).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.pull_doctor_slot(AISHA, SLOT).await.unwrap() })
        });

        let wins = join_all(attempts)
            .await
            .into_iter()
            .filter(|result| *result.as_ref().unwrap())
            .count();

        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_append_entry_with_and_without_upsert() {
        let store = MemoryStore::new();

        let missing = store
            .append_patient_entry("ghost", HistoryField::Allergies, "Dust", false)
            .await
            .unwrap();
        assert!(missing.is_none());
        assert!(store.find_patient("ghost").await.unwrap().is_none());

        let created = store
            .append_patient_entry("ghost", HistoryField::Allergies, "Dust", true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.allergies, vec!["Dust".to_string()]);

        let updated = store
            .append_patient_entry("ghost", HistoryField::Allergies, "Dust", false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.allergies.len(), 2);
    }

    #[tokio::test]
    async fn test_health_records_window_is_ascending() {
        let store = MemoryStore::new();
        let now = Utc::now();

        for days_ago in [2, 45, 1, 10] {
            store
                .insert_health_record(&HealthRecord {
                    id: Uuid::new_v4(),
                    user_id: "user-1".into(),
                    date: now - Duration::days(days_ago),
                    metric_type: MetricType::Weight,
                    value: MetricValue::Scalar(70.0 + days_ago as f64),
                })
                .await
                .unwrap();
        }

        let records = store
            .find_health_records_since("user-1", now - Duration::days(30))
            .await
            .unwrap();

        let values: Vec<MetricValue> = records.iter().map(|r| r.value).collect();
        assert_eq!(
            values,
            vec![
                MetricValue::Scalar(80.0),
                MetricValue::Scalar(72.0),
                MetricValue::Scalar(71.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_reset_clears_appointments() {
        let store = MemoryStore::with_seed(&SeedData::demo()).await;
        store
            .insert_appointment(&Appointment {
                id: Uuid::new_v4(),
                user_id: "user-1".into(),
                doctor_name: AISHA.into(),
                specialty: "Dermatologist".into(),
                date: "11/16/2025".into(),
                time: "9:00:00 AM".into(),
                slot_iso: SLOT.into(),
                booked_at: Utc::now(),
            })
            .await
            .unwrap();

        store.reset_with(&SeedData::demo()).await.unwrap();
        assert!(store.find_appointments("user-1").await.unwrap().is_empty());
    }
}
