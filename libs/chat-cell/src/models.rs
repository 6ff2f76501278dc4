use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub const RESOLVER_FAILURE_REPLY: &str =
    "I'm having a technical problem right now. Please try again later.";
pub const ACTION_FAILURE_REPLY: &str =
    "I had an error trying to complete that action. Please try again.";
pub const MISSING_REPLY_FALLBACK: &str =
    "I'm sorry, I didn't quite catch that. Could you please rephrase?";

/// One conversation turn in Gemini `contents` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub parts: Vec<ChatPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPart {
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: &str) -> Self {
        Self::with_role("user", text)
    }

    pub fn model(text: &str) -> Self {
        Self::with_role("model", text)
    }

    fn with_role(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![ChatPart { text: text.to_string() }],
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.parts.first().map(|part| part.text.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyRequest {
    pub user_id: Option<String>,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReplyResponse {
    pub reply: String,
}

/// The closed set of side effects a chat turn can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatAction {
    BookAppointment,
    LogMetric,
    GetHistory,
    #[default]
    None,
}

impl ChatAction {
    /// Anything outside the known set degrades to `None`.
    pub fn from_wire(action: Option<&str>) -> Self {
        match action.map(str::trim) {
            Some("BookAppointment") => ChatAction::BookAppointment,
            Some("LogMetric") => ChatAction::LogMetric,
            Some("GetHistory") => ChatAction::GetHistory,
            _ => ChatAction::None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParameters {
    #[serde(default, deserialize_with = "lenient_string")]
    pub doctor_name: Option<String>,
    #[serde(default, rename = "slotISO", deserialize_with = "lenient_string")]
    pub slot_iso: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub metric_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub metric_value: Option<String>,
}

impl ActionParameters {
    pub fn booking(&self) -> Option<(&str, &str)> {
        Some((non_blank(&self.doctor_name)?, non_blank(&self.slot_iso)?))
    }

    pub fn metric(&self) -> Option<(&str, &str)> {
        Some((non_blank(&self.metric_type)?, non_blank(&self.metric_value)?))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Models sometimes emit `105` where a string was asked for.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// The model's JSON output as sent, before normalisation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentPayload {
    pub action: Option<String>,
    #[serde(default)]
    pub parameters: Option<ActionParameters>,
    pub reply: Option<String>,
}

/// A normalised intent: known action, parameters and a non-empty reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIntent {
    pub action: ChatAction,
    pub parameters: ActionParameters,
    pub reply: String,
}

impl ResolvedIntent {
    pub fn reply(reply: &str) -> Self {
        Self {
            action: ChatAction::None,
            parameters: ActionParameters::default(),
            reply: reply.to_string(),
        }
    }

    pub fn with_action(action: ChatAction, parameters: ActionParameters, reply: &str) -> Self {
        Self {
            action,
            parameters,
            reply: reply.to_string(),
        }
    }
}

impl From<IntentPayload> for ResolvedIntent {
    fn from(payload: IntentPayload) -> Self {
        let reply = payload
            .reply
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| MISSING_REPLY_FALLBACK.to_string());

        Self {
            action: ChatAction::from_wire(payload.action.as_deref()),
            parameters: payload.parameters.unwrap_or_default(),
            reply,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Chat history is required.")]
    MissingHistory,

    #[error("Intent resolver error: {0}")]
    Resolver(String),

    #[error("Intent resolver timed out after {0}s")]
    Timeout(u64),

    #[error("Malformed intent response: {0}")]
    MalformedResponse(String),

    #[error("Failed to load grounding data: {0}")]
    Grounding(String),

    #[error("Action failed: {0}")]
    Action(String),
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        match self {
            ChatError::MissingHistory => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response()
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatReplyResponse {
                    reply: ACTION_FAILURE_REPLY.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
