use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shared_models::{Appointment, Doctor, HealthRecord, HistoryField, Patient, SymptomMapping};

use crate::seed::SeedData;

pub type SharedStore = Arc<dyn ClinicStore>;

/// Persistence for the five clinic collections.
///
/// Every method is an independent document operation. The only one with a
/// cross-request guarantee is [`ClinicStore::pull_doctor_slot`], which must be
/// a single compare-and-mutate at the store level.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;

    async fn find_doctors_by_specialization(&self, specialization: &str) -> Result<Vec<Doctor>>;

    async fn find_doctor_by_name(&self, name: &str) -> Result<Option<Doctor>>;

    /// Removes `slot_iso` from the named doctor's availability if, and only
    /// if, the doctor currently holds it. Returns whether a slot was removed.
    async fn pull_doctor_slot(&self, doctor_name: &str, slot_iso: &str) -> Result<bool>;

    async fn find_patient(&self, user_id: &str) -> Result<Option<Patient>>;

    /// Appends `entry` to one of the patient's history lists and returns the
    /// updated record. With `upsert` a blank patient is created first when
    /// none exists; without it a missing patient yields `None`.
    async fn append_patient_entry(
        &self,
        user_id: &str,
        field: HistoryField,
        entry: &str,
        upsert: bool,
    ) -> Result<Option<Patient>>;

    async fn list_symptom_mappings(&self) -> Result<Vec<SymptomMapping>>;

    async fn insert_health_record(&self, record: &HealthRecord) -> Result<()>;

    /// Records for `user_id` dated at or after `since`, oldest first.
    async fn find_health_records_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<HealthRecord>>;

    async fn insert_appointment(&self, appointment: &Appointment) -> Result<()>;

    /// Appointments for `user_id`, most recently booked first.
    async fn find_appointments(&self, user_id: &str) -> Result<Vec<Appointment>>;

    /// Drops every collection and repopulates it from `seed`.
    async fn reset_with(&self, seed: &SeedData) -> Result<()>;
}
