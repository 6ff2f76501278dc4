use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use tracing::{error, info};
use uuid::Uuid;

use shared_models::{
    Doctor, DoctorStatus, HealthRecord, MetricType, MetricValue, Patient, SymptomMapping,
};

use crate::store::ClinicStore;

pub const DEMO_USER_ID: &str = "user-nitin-123";

/// Initial contents for every collection except appointments.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub doctors: Vec<Doctor>,
    pub symptom_map: Vec<SymptomMapping>,
    pub patients: Vec<Patient>,
    pub health_records: Vec<HealthRecord>,
}

impl SeedData {
    pub fn demo() -> Self {
        Self {
            doctors: vec![
                doctor(
                    "Dr. Priya Gupta",
                    "General Physician",
                    DoctorStatus::Online,
                    "12 years",
                    4.7,
                    "👩‍⚕️",
                    &[
                        "2025-11-15T10:00:00Z",
                        "2025-11-15T10:30:00Z",
                        "2025-11-15T18:00:00Z",
                        "2025-11-16T11:00:00Z",
                    ],
                ),
                doctor(
                    "Dr. Rohan Rao",
                    "Cardiologist",
                    DoctorStatus::Offline,
                    "18 years",
                    4.9,
                    "👨‍⚕️",
                    &["2025-11-15T14:00:00Z", "2025-11-15T14:30:00Z"],
                ),
                doctor(
                    "Dr. Aisha Khan",
                    "Dermatologist",
                    DoctorStatus::Online,
                    "10 years",
                    4.9,
                    "👩‍⚕️",
                    &["2025-11-16T09:00:00Z", "2025-11-16T09:30:00Z"],
                ),
                doctor(
                    "Dr. Sanjay Rao",
                    "Neurologist",
                    DoctorStatus::Online,
                    "20 years",
                    4.9,
                    "👨‍⚕️",
                    &["2025-11-17T11:00:00Z"],
                ),
                doctor(
                    "Dr. Kavita Reddy",
                    "Gastroenterologist",
                    DoctorStatus::Online,
                    "14 years",
                    4.8,
                    "👩‍⚕️",
                    &["2025-11-17T13:00:00Z", "2025-11-17T18:30:00Z"],
                ),
            ],
            symptom_map: vec![
                SymptomMapping::new("cough", "General Physician"),
                SymptomMapping::new("fever", "General Physician"),
                SymptomMapping::new("rash", "Dermatologist"),
                SymptomMapping::new("chest pain", "Cardiologist"),
                SymptomMapping::new("headache", "Neurologist"),
                SymptomMapping::new("stomach pain", "Gastroenterologist"),
            ],
            patients: vec![Patient {
                name: Some("Nitin Sharma".to_string()),
                dob: Some("1985-05-15".to_string()),
                allergies: vec!["Peanuts".to_string()],
                conditions: vec!["Hypertension".to_string()],
                medications: vec!["Amlodipine 5mg".to_string()],
                ..Patient::empty(DEMO_USER_ID)
            }],
            health_records: vec![
                bp_reading(Utc.with_ymd_and_hms(2025, 11, 14, 9, 0, 0).single(), 125.0, 82.0),
                bp_reading(Utc.with_ymd_and_hms(2025, 11, 15, 9, 5, 0).single(), 122.0, 80.0),
            ]
            .into_iter()
            .flatten()
            .collect(),
        }
    }
}

fn doctor(
    name: &str,
    specialization: &str,
    status: DoctorStatus,
    experience: &str,
    rating: f32,
    photo: &str,
    slots: &[&str],
) -> Doctor {
    Doctor {
        experience: experience.to_string(),
        rating,
        photo: photo.to_string(),
        ..Doctor::new(name, specialization, status).with_slots(slots.iter().copied())
    }
}

fn bp_reading(date: Option<DateTime<Utc>>, systolic: f64, diastolic: f64) -> Option<HealthRecord> {
    Some(HealthRecord {
        id: Uuid::new_v4(),
        user_id: DEMO_USER_ID.to_string(),
        date: date?,
        metric_type: MetricType::Bp,
        value: MetricValue::BloodPressure { systolic, diastolic },
    })
}

/// Wipes the store and loads the demo roster. Failures are logged and
/// returned; callers treat them as non-fatal.
pub async fn seed_demo_data(store: &dyn ClinicStore) -> Result<()> {
    let seed = SeedData::demo();
    match store.reset_with(&seed).await {
        Ok(()) => {
            info!(
                "Database populated with {} doctors, {} symptom mappings, {} patients",
                seed.doctors.len(),
                seed.symptom_map.len(),
                seed.patients.len()
            );
            Ok(())
        }
        Err(e) => {
            error!("Error populating demo data: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_seed_contents() {
        let seed = SeedData::demo();

        assert_eq!(seed.doctors.len(), 5);
        assert_eq!(seed.symptom_map.len(), 6);
        assert_eq!(seed.health_records.len(), 2);

        let aisha = seed.doctors.iter().find(|d| d.name == "Dr. Aisha Khan").unwrap();
        assert_eq!(aisha.specialization, "Dermatologist");
        assert!(aisha.has_slot("2025-11-16T09:00:00Z"));

        let rohan = seed.doctors.iter().find(|d| d.name == "Dr. Rohan Rao").unwrap();
        assert_eq!(rohan.status, DoctorStatus::Offline);
    }
}
