use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declaration order doubles as sort order: `offline` sorts before `online`,
/// the same as comparing the raw status strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    Offline,
    Online,
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorStatus::Offline => write!(f, "offline"),
            DoctorStatus::Online => write!(f, "online"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    /// Bookable slots as RFC 3339 strings. Only ever shrinks.
    #[serde(default)]
    pub availability: Vec<String>,
    pub status: DoctorStatus,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub photo: String,
}

impl Doctor {
    pub fn new(name: &str, specialization: &str, status: DoctorStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            specialization: specialization.to_string(),
            availability: Vec::new(),
            status,
            experience: String::new(),
            rating: 0.0,
            photo: String::new(),
        }
    }

    pub fn with_slots<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.availability = slots.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_slot(&self, slot_iso: &str) -> bool {
        self.availability.iter().any(|slot| slot == slot_iso)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_orders_offline_first() {
        let mut statuses = vec![DoctorStatus::Online, DoctorStatus::Offline];
        statuses.sort();
        assert_eq!(statuses, vec![DoctorStatus::Offline, DoctorStatus::Online]);
    }

    #[test]
    fn test_doctor_wire_format() {
        let doctor = Doctor::new("Dr. Aisha Khan", "Dermatologist", DoctorStatus::Online)
            .with_slots(["2025-11-16T09:00:00Z"]);
        let value = serde_json::to_value(&doctor).unwrap();

        assert_eq!(value["status"], "online");
        assert_eq!(value["availability"][0], "2025-11-16T09:00:00Z");
        assert!(doctor.has_slot("2025-11-16T09:00:00Z"));
        assert!(!doctor.has_slot("2025-11-16T09:30:00Z"));
    }
}
