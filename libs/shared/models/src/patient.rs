use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub user_id: String,
    pub name: Option<String>,
    pub dob: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
}

impl Patient {
    /// Blank record created when an append targets an unknown user.
    pub fn empty(user_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: None,
            dob: None,
            allergies: Vec::new(),
            conditions: Vec::new(),
            medications: Vec::new(),
        }
    }

    pub fn entries(&self, field: HistoryField) -> &[String] {
        match field {
            HistoryField::Allergies => &self.allergies,
            HistoryField::Conditions => &self.conditions,
            HistoryField::Medications => &self.medications,
        }
    }

    pub fn entries_mut(&mut self, field: HistoryField) -> &mut Vec<String> {
        match field {
            HistoryField::Allergies => &mut self.allergies,
            HistoryField::Conditions => &mut self.conditions,
            HistoryField::Medications => &mut self.medications,
        }
    }
}

/// The three append-only lists on a patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryField {
    Allergies,
    Conditions,
    Medications,
}

impl HistoryField {
    pub fn column(&self) -> &'static str {
        match self {
            HistoryField::Allergies => "allergies",
            HistoryField::Conditions => "conditions",
            HistoryField::Medications => "medications",
        }
    }
}

impl fmt::Display for HistoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
