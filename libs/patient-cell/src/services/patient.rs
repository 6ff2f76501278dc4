use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error, info};

use shared_database::SharedStore;
use shared_models::{HistoryField, Patient};

use crate::models::{EntryKind, HistoryEntry, PatientError};

const CHAT_COMMAND_HELP: &str =
    "I can help you add or remove allergies, medications, or conditions. Could you please be more specific?";

static ADD_ALLERGY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"add allergy to\s*(.+)").unwrap());
static ADD_MEDICATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"add medication\s*(.+)").unwrap());
static ADD_CONDITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"add condition\s*(.+)").unwrap());

/// Reply text for a history lookup. Empty lists read as "None".
pub fn format_history_summary(patient: Option<&Patient>) -> String {
    let Some(patient) = patient else {
        return "I don't have any medical history for you.".to_string();
    };

    let list = |field: HistoryField| {
        let entries = patient.entries(field);
        if entries.is_empty() {
            "None".to_string()
        } else {
            entries.join(", ")
        }
    };

    format!(
        "Here's what I have for your medical history:\n- Allergies: {}\n- Conditions: {}\n- Medications: {}",
        list(HistoryField::Allergies),
        list(HistoryField::Conditions),
        list(HistoryField::Medications),
    )
}

pub struct PatientHistoryService {
    store: SharedStore,
}

impl PatientHistoryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn find_patient(&self, user_id: &str) -> Result<Option<Patient>, PatientError> {
        debug!("Fetching patient record for {}", user_id);
        self.store
            .find_patient(user_id)
            .await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))
    }

    pub async fn get_history(&self, user_id: &str) -> Result<Patient, PatientError> {
        self.find_patient(user_id).await?.ok_or(PatientError::NotFound)
    }

    pub async fn history_summary(&self, user_id: &str) -> Result<String, PatientError> {
        let patient = self.find_patient(user_id).await?;
        Ok(format_history_summary(patient.as_ref()))
    }

    /// Appends a structured entry, creating the patient record if needed.
    pub async fn add_entry(
        &self,
        user_id: &str,
        entry_type: &str,
        entry: &HistoryEntry,
    ) -> Result<Patient, PatientError> {
        let kind: EntryKind = entry_type.parse()?;
        let text = entry.render(kind)?;

        let patient = self
            .store
            .append_patient_entry(user_id, kind.field(), &text, true)
            .await
            .map_err(|e| {
                error!("Failed to append {} for {}: {}", kind.field(), user_id, e);
                PatientError::DatabaseError(e.to_string())
            })?;

        info!("Added '{}' to {} for {}", text, kind.field(), user_id);
        patient.ok_or(PatientError::NotFound)
    }

    /// Keyword shortcut used by the history page chat panel. Only appends to
    /// existing records.
    pub async fn chat_command(&self, user_id: &str, message: &str) -> Result<String, PatientError> {
        let lower = message.trim().to_lowercase();

        let Some((field, item)) = parse_chat_command(&lower) else {
            return Ok(CHAT_COMMAND_HELP.to_string());
        };

        let updated = self
            .store
            .append_patient_entry(user_id, field, &item, false)
            .await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        if updated.is_none() {
            return Ok(format!(
                "I don't have any records for you yet, so I couldn't add {}.",
                item
            ));
        }

        Ok(match field {
            HistoryField::Allergies => format!("✅ I've added {} to your allergy records.", item),
            HistoryField::Medications => format!("✅ Medication {} added to your list.", item),
            HistoryField::Conditions => format!("✅ Condition {} added to your records.", item),
        })
    }
}

fn parse_chat_command(lower: &str) -> Option<(HistoryField, String)> {
    [
        (&*ADD_ALLERGY, HistoryField::Allergies),
        (&*ADD_MEDICATION, HistoryField::Medications),
        (&*ADD_CONDITION, HistoryField::Conditions),
    ]
    .into_iter()
    .find_map(|(pattern, field)| {
        let item = pattern.captures(lower)?.get(1)?.as_str().trim();
        (!item.is_empty()).then(|| (field, item.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_none_for_empty_fields() {
        let patient = Patient::empty("user-1");
        assert_eq!(
            format_history_summary(Some(&patient)),
            "Here's what I have for your medical history:\n- Allergies: None\n- Conditions: None\n- Medications: None"
        );
    }

    #[test]
    fn test_summary_joins_entries() {
        let mut patient = Patient::empty("user-1");
        patient.allergies = vec!["Peanuts".into(), "Dust".into()];
        patient.medications = vec!["Amlodipine - 5mg".into()];

        let summary = format_history_summary(Some(&patient));
        assert!(summary.contains("- Allergies: Peanuts, Dust"));
        assert!(summary.contains("- Conditions: None"));
        assert!(summary.contains("- Medications: Amlodipine - 5mg"));
    }

    #[test]
    fn test_summary_without_patient() {
        assert_eq!(format_history_summary(None), "I don't have any medical history for you.");
    }

    #[test]
    fn test_parse_chat_command() {
        assert_eq!(
            parse_chat_command("please add allergy to penicillin"),
            Some((HistoryField::Allergies, "penicillin".to_string()))
        );
        assert_eq!(
            parse_chat_command("add medication ibuprofen 200mg"),
            Some((HistoryField::Medications, "ibuprofen 200mg".to_string()))
        );
        assert_eq!(
            parse_chat_command("add condition asthma"),
            Some((HistoryField::Conditions, "asthma".to_string()))
        );
        assert_eq!(
            parse_chat_command("add allergy to dust\nthanks"),
            Some((HistoryField::Allergies, "dust".to_string()))
        );
        assert_eq!(
            parse_chat_command("add allergy topenicillin"),
            Some((HistoryField::Allergies, "penicillin".to_string()))
        );
        assert_eq!(parse_chat_command("add allergy to"), None);
        assert_eq!(parse_chat_command("add allergy to   "), None);
        assert_eq!(parse_chat_command("remove everything"), None);
    }
}
