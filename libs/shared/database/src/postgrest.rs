use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use urlencoding::encode;

use shared_config::AppConfig;
use shared_models::{Appointment, Doctor, HealthRecord, HistoryField, Patient, SymptomMapping};

use crate::seed::SeedData;
use crate::store::ClinicStore;
use crate::supabase::SupabaseClient;

const DOCTORS: &str = "/rest/v1/doctors";
const PATIENTS: &str = "/rest/v1/patients";
const SYMPTOM_MAP: &str = "/rest/v1/symptom_map";
const HEALTH_RECORDS: &str = "/rest/v1/health_records";
const APPOINTMENTS: &str = "/rest/v1/appointments";

/// Store backed by Supabase tables (see `migrations/`). The slot pull and the
/// history append run as single-statement SQL functions over RPC.
pub struct SupabaseStore {
    supabase: SupabaseClient,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    async fn insert_rows(&self, table: &str, rows: Value) -> Result<()> {
        if rows.as_array().is_some_and(|rows| rows.is_empty()) {
            return Ok(());
        }
        self.supabase.execute(Method::POST, table, Some(rows)).await
    }
}

#[async_trait]
impl ClinicStore for SupabaseStore {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let path = format!("{}?select=*&order=name.asc", DOCTORS);
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn find_doctors_by_specialization(&self, specialization: &str) -> Result<Vec<Doctor>> {
        let path = format!("{}?specialization=eq.{}", DOCTORS, encode(specialization));
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn find_doctor_by_name(&self, name: &str) -> Result<Option<Doctor>> {
        let path = format!("{}?name=eq.{}&limit=1", DOCTORS, encode(name));
        let doctors: Vec<Doctor> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(doctors.into_iter().next())
    }

    async fn pull_doctor_slot(&self, doctor_name: &str, slot_iso: &str) -> Result<bool> {
        debug!("RPC pull_doctor_slot({}, {})", doctor_name, slot_iso);
        self.supabase
            .rpc(
                "pull_doctor_slot",
                json!({ "p_doctor_name": doctor_name, "p_slot": slot_iso }),
            )
            .await
    }

    async fn find_patient(&self, user_id: &str) -> Result<Option<Patient>> {
        let path = format!("{}?userId=eq.{}&limit=1", PATIENTS, encode(user_id));
        let patients: Vec<Patient> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(patients.into_iter().next())
    }

    async fn append_patient_entry(
        &self,
        user_id: &str,
        field: HistoryField,
        entry: &str,
        upsert: bool,
    ) -> Result<Option<Patient>> {
        let patients: Vec<Patient> = self
            .supabase
            .rpc(
                "append_patient_entry",
                json!({
                    "p_user_id": user_id,
                    "p_field": field.column(),
                    "p_entry": entry,
                    "p_upsert": upsert,
                }),
            )
            .await?;
        Ok(patients.into_iter().next())
    }

    async fn list_symptom_mappings(&self) -> Result<Vec<SymptomMapping>> {
        let path = format!("{}?select=symptom,specialist", SYMPTOM_MAP);
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn insert_health_record(&self, record: &HealthRecord) -> Result<()> {
        self.supabase
            .execute(Method::POST, HEALTH_RECORDS, Some(serde_json::to_value(record)?))
            .await
    }

    async fn find_health_records_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<HealthRecord>> {
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let path = format!(
            "{}?userId=eq.{}&date=gte.{}&order=date.asc",
            HEALTH_RECORDS,
            encode(user_id),
            encode(&since)
        );
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn insert_appointment(&self, appointment: &Appointment) -> Result<()> {
        self.supabase
            .execute(Method::POST, APPOINTMENTS, Some(serde_json::to_value(appointment)?))
            .await
    }

    async fn find_appointments(&self, user_id: &str) -> Result<Vec<Appointment>> {
        let path = format!("{}?userId=eq.{}&order=bookedAt.desc", APPOINTMENTS, encode(user_id));
        self.supabase.request(Method::GET, &path, None).await
    }

    async fn reset_with(&self, seed: &SeedData) -> Result<()> {
        // PostgREST refuses unfiltered deletes.
        for path in [
            format!("{}?id=not.is.null", APPOINTMENTS),
            format!("{}?id=not.is.null", HEALTH_RECORDS),
            format!("{}?id=not.is.null", PATIENTS),
            format!("{}?symptom=not.is.null", SYMPTOM_MAP),
            format!("{}?id=not.is.null", DOCTORS),
        ] {
            self.supabase.execute(Method::DELETE, &path, None).await?;
        }

        self.insert_rows(DOCTORS, serde_json::to_value(&seed.doctors)?).await?;
        self.insert_rows(SYMPTOM_MAP, serde_json::to_value(&seed.symptom_map)?).await?;
        self.insert_rows(PATIENTS, serde_json::to_value(&seed.patients)?).await?;
        self.insert_rows(HEALTH_RECORDS, serde_json::to_value(&seed.health_records)?).await?;
        Ok(())
    }
}
