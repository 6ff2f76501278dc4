use serde::{Deserialize, Serialize};

/// A lowercase keyword mapped to the specialist who handles it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomMapping {
    pub symptom: String,
    pub specialist: String,
}

impl SymptomMapping {
    pub fn new(symptom: &str, specialist: &str) -> Self {
        Self {
            symptom: symptom.to_lowercase(),
            specialist: specialist.to_string(),
        }
    }

    /// Plain substring match against already-lowercased text.
    pub fn matches(&self, lowercase_text: &str) -> bool {
        !self.symptom.is_empty() && lowercase_text.contains(&self.symptom)
    }
}
