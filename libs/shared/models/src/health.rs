use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Bp,
    Glucose,
    Heart,
    Weight,
    Temp,
}

impl MetricType {
    /// Blood pressure is the only reading stored as a systolic/diastolic pair.
    pub fn is_composite(&self) -> bool {
        matches!(self, MetricType::Bp)
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::Bp => write!(f, "bp"),
            MetricType::Glucose => write!(f, "glucose"),
            MetricType::Heart => write!(f, "heart"),
            MetricType::Weight => write!(f, "weight"),
            MetricType::Temp => write!(f, "temp"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown metric type: {0}")]
pub struct UnknownMetricType(pub String);

impl FromStr for MetricType {
    type Err = UnknownMetricType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "bp" | "blood pressure" => Ok(MetricType::Bp),
            "glucose" | "sugar" | "blood sugar" | "blood glucose" => Ok(MetricType::Glucose),
            "heart" | "heart rate" | "pulse" | "hr" => Ok(MetricType::Heart),
            "weight" => Ok(MetricType::Weight),
            "temp" | "temperature" => Ok(MetricType::Temp),
            _ => Err(UnknownMetricType(s.to_string())),
        }
    }
}

/// Stored untagged so a reading looks like `105` or
/// `{"systolic": 120, "diastolic": 80}` on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetricValue {
    BloodPressure { systolic: f64, diastolic: f64 },
    Scalar(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::BloodPressure { systolic, diastolic } => {
                write!(f, "{}/{}", systolic, diastolic)
            }
            MetricValue::Scalar(value) => write!(f, "{}", value),
        }
    }
}

/// One immutable health-tracker entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: Uuid,
    pub user_id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub value: MetricValue,
}
