use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booked slot. Doctor name and specialty are snapshots taken at booking
/// time; `slot_iso` is the key that was pulled from the doctor's availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "slotISO")]
    pub slot_iso: String,
    pub booked_at: DateTime<Utc>,
}
