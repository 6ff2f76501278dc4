use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The tracker page posts numbers as JSON numbers, the chat path passes
/// model-extracted strings such as "120/80".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricInput {
    Number(f64),
    Text(String),
}

impl MetricInput {
    pub fn as_text(&self) -> String {
        match self {
            MetricInput::Number(value) => value.to_string(),
            MetricInput::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogMetricRequest {
    #[serde(rename = "type")]
    pub metric_type: Option<String>,
    pub value: Option<MetricInput>,
    /// Backdates the reading: RFC 3339 or `YYYY-MM-DD`. Server time is used
    /// when absent or blank.
    pub date: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown metric type '{0}'")]
    UnknownType(String),

    #[error("Invalid value '{value}' for {metric_type}")]
    InvalidValue { metric_type: String, value: String },

    #[error("Invalid date '{0}', expected RFC 3339 or YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
