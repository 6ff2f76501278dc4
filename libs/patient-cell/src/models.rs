use serde::{Deserialize, Serialize};
use std::str::FromStr;

use shared_models::HistoryField;

/// Singular entry kind as the history page posts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Allergy,
    Medication,
    Condition,
}

impl EntryKind {
    pub fn field(&self) -> HistoryField {
        match self {
            EntryKind::Allergy => HistoryField::Allergies,
            EntryKind::Medication => HistoryField::Medications,
            EntryKind::Condition => HistoryField::Conditions,
        }
    }
}

impl FromStr for EntryKind {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allergy" => Ok(EntryKind::Allergy),
            "medication" => Ok(EntryKind::Medication),
            "condition" => Ok(EntryKind::Condition),
            _ => Err(PatientError::InvalidEntryType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: Option<String>,
    pub dosage: Option<String>,
}

impl HistoryEntry {
    /// Medications carry their dosage inline, e.g. `Amlodipine - 5mg`.
    pub fn render(&self, kind: EntryKind) -> Result<String, PatientError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(PatientError::EmptyEntry)?;

        let dosage = self.dosage.as_deref().map(str::trim).filter(|d| !d.is_empty());
        Ok(match (kind, dosage) {
            (EntryKind::Medication, Some(dosage)) => format!("{} - {}", name, dosage),
            _ => name.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddHistoryRequest {
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub entry: HistoryEntry,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatCommandRequest {
    pub message: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCommandResponse {
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Invalid entry type '{0}'")]
    InvalidEntryType(String),

    #[error("Entry name is required")]
    EmptyEntry,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medication_renders_with_dosage() {
        let entry = HistoryEntry {
            name: Some("Metformin".into()),
            dosage: Some("500mg".into()),
        };
        assert_eq!(entry.render(EntryKind::Medication).unwrap(), "Metformin - 500mg");
        assert_eq!(entry.render(EntryKind::Allergy).unwrap(), "Metformin");

        let bare = HistoryEntry { name: Some("Aspirin".into()), dosage: None };
        assert_eq!(bare.render(EntryKind::Medication).unwrap(), "Aspirin");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let entry = HistoryEntry { name: Some("  ".into()), dosage: None };
        assert_eq!(entry.render(EntryKind::Condition), Err(PatientError::EmptyEntry));
    }

    #[test]
    fn test_entry_kind_parsing() {
        assert_eq!("Allergy".parse::<EntryKind>().unwrap().field(), HistoryField::Allergies);
        assert_eq!(
            "surgery".parse::<EntryKind>(),
            Err(PatientError::InvalidEntryType("surgery".into()))
        );
    }
}
