use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use shared_models::{Doctor, Patient, SymptomMapping};

pub const MODEL_ACKNOWLEDGEMENT: &str =
    "Understood. I am Apo-Bot, ready to assist with the provided database information and perform actions.";

/// Live store snapshot the model reasons over for a single turn.
#[derive(Debug, Clone, Default)]
pub struct Grounding {
    pub doctors: Vec<Doctor>,
    pub patient: Option<Patient>,
    pub symptom_map: Vec<SymptomMapping>,
}

pub fn build_system_prompt(
    user_id: &str,
    today: DateTime<Utc>,
    grounding: &Grounding,
) -> Result<String, serde_json::Error> {
    let patient = serde_json::to_string_pretty(&grounding.patient)?;
    let doctors = serde_json::to_string_pretty(&grounding.doctors)?;
    let symptom_map = serde_json::to_string_pretty(&grounding.symptom_map)?;

    Ok(format!(
        r#"You are Apo-Bot, a friendly and professional AI healthcare assistant.
Your job is to manage a patient's healthcare needs.
Today is {today}. Video calls are disabled.

**YOUR TOOLS (LIVE DATABASE DATA):**

1.  **Patient Data (Patient ID: {user_id}):**
    ```json
    {patient}
    ```

2.  **Available Doctors & Appointments (LIVE DATA):**
    ```json
    {doctors}
    ```

3.  **Symptom-to-Specialist Map:**
    ```json
    {symptom_map}
    ```

**YOUR TASKS & RULES:**

1.  **Book Appointment:**
    * **Offer:** When a user asks for an appointment (e.g., "I have a cough", "I need 6 pm"), find a matching slot from the "Available Doctors" list. Offer *one* slot in your `reply`. **Do not set an action.**
    * **Confirm:** When the user *confirms* a slot you just offered (e.g., "yes", "that works", "book it"), you **MUST** set `action: "BookAppointment"` and provide the exact `doctorName` and `slotISO` in the `parameters`. Your `reply` should be the confirmation.
    * **Handle Rejection:** If the user rejects a slot, look for another slot in the database data that matches their new request and offer it (action: "None").

2.  **Log Metric:**
    * When the user asks to log a metric (e.g., "log my bp 120/80"), you **MUST** set `action: "LogMetric"` and provide the `metricType` (one of bp, glucose, heart, weight, temp) and `metricValue`.
    * Your `reply` should be the confirmation.

3.  **Get History:**
    * When the user asks for their history, set `action: "GetHistory"`.
    * Your `reply` should be a simple "One moment, I'll pull up your records."

**IMPORTANT**: Always respond with a valid JSON object matching the schema.
"#,
        today = today.format("%a %b %d %Y"),
    ))
}

/// `generationConfig.responseSchema` for JSON-mode output.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "action": {
                "type": "STRING",
                "enum": ["BookAppointment", "LogMetric", "GetHistory", "None"],
                "description": "The database action to perform. Use 'None' if only talking."
            },
            "parameters": {
                "type": "OBJECT",
                "description": "Parameters for the action.",
                "properties": {
                    "doctorName": { "type": "STRING", "description": "The full name of the doctor, e.g., 'Dr. Priya Gupta'" },
                    "slotISO": { "type": "STRING", "description": "The full ISO 8601 string for the slot, e.g., '2025-11-15T18:00:00Z'" },
                    "metricType": { "type": "STRING", "description": "The type of metric, e.g., 'bp' or 'glucose'" },
                    "metricValue": { "type": "STRING", "description": "The value of the metric, e.g., '120/80' or '105'" }
                }
            },
            "reply": {
                "type": "STRING",
                "description": "The conversational text reply to send to the user."
            }
        },
        "required": ["reply"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared_models::DoctorStatus;

    #[test]
    fn test_prompt_embeds_live_data() {
        let grounding = Grounding {
            doctors: vec![Doctor::new("Dr. Aisha Khan", "Dermatologist", DoctorStatus::Online)
                .with_slots(["2025-11-16T09:00:00Z"])],
            patient: None,
            symptom_map: vec![SymptomMapping::new("rash", "Dermatologist")],
        };
        let today = Utc.with_ymd_and_hms(2025, 11, 14, 8, 0, 0).unwrap();

        let prompt = build_system_prompt("user-1", today, &grounding).unwrap();
        assert!(prompt.contains("Today is Fri Nov 14 2025."));
        assert!(prompt.contains("Patient ID: user-1"));
        assert!(prompt.contains("2025-11-16T09:00:00Z"));
        assert!(prompt.contains("\"specialist\": \"Dermatologist\""));
        assert!(prompt.contains("    null\n"));
    }

    #[test]
    fn test_schema_lists_closed_action_set() {
        let schema = response_schema();
        assert_eq!(
            schema["properties"]["action"]["enum"],
            json!(["BookAppointment", "LogMetric", "GetHistory", "None"])
        );
        assert_eq!(schema["required"], json!(["reply"]));
    }
}
