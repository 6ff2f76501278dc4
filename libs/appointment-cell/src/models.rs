// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::Appointment;

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Body of `POST /book-appointment`. The booking page also echoes the
/// specialty and display date/time it showed; those are ignored in favour of
/// values derived from the slot itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_name: Option<String>,
    #[serde(rename = "slotISO")]
    pub slot_iso: Option<String>,
    pub user_id: Option<String>,
    pub specialty: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentResponse {
    pub message: String,
    pub appointment: Appointment,
}

/// Human-readable rendering of a slot, in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLabels {
    pub date: String,
    pub time: String,
}

impl SlotLabels {
    pub fn from_slot(slot_iso: &str) -> Result<Self, AppointmentError> {
        let slot: DateTime<Utc> = DateTime::parse_from_rfc3339(slot_iso)
            .map_err(|_| {
                AppointmentError::ValidationError(format!(
                    "slotISO '{}' is not an ISO-8601 timestamp",
                    slot_iso
                ))
            })?
            .with_timezone(&Utc);

        Ok(Self {
            date: slot.format("%-m/%-d/%Y").to_string(),
            time: slot.format("%-I:%M:%S %p").to_string(),
        })
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppointmentError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Slot {slot_iso} with {doctor_name} is already taken or does not exist")]
    SlotUnavailable {
        doctor_name: String,
        slot_iso: String,
    },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_labels_render_in_utc() {
        let labels = SlotLabels::from_slot("2025-11-16T09:00:00Z").unwrap();
        assert_eq!(labels.date, "11/16/2025");
        assert_eq!(labels.time, "9:00:00 AM");

        let evening = SlotLabels::from_slot("2025-11-15T18:30:00+00:00").unwrap();
        assert_eq!(evening.time, "6:30:00 PM");
    }

    #[test]
    fn test_slot_labels_reject_garbage() {
        let err = SlotLabels::from_slot("tomorrow at nine").unwrap_err();
        assert!(matches!(err, AppointmentError::ValidationError(_)));
    }

    #[test]
    fn test_request_accepts_booking_page_payload() {
        let request: BookAppointmentRequest = serde_json::from_value(serde_json::json!({
            "doctorName": "Dr. Aisha Khan",
            "specialty": "Dermatologist",
            "date": "11/16/2025",
            "time": "9:00 AM",
            "slotISO": "2025-11-16T09:00:00Z"
        }))
        .unwrap();

        assert_eq!(request.doctor_name.as_deref(), Some("Dr. Aisha Khan"));
        assert_eq!(request.slot_iso.as_deref(), Some("2025-11-16T09:00:00Z"));
        assert!(request.user_id.is_none());
    }

    #[test]
    fn test_conflict_message_names_slot() {
        let err = AppointmentError::SlotUnavailable {
            doctor_name: "Dr. Aisha Khan".into(),
            slot_iso: "2025-11-16T09:00:00Z".into(),
        };
        let message = err.to_string();
        assert!(message.contains("already taken"));
        assert!(message.contains("2025-11-16T09:00:00Z"));
    }
}
