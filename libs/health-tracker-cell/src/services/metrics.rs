use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{error, info};
use uuid::Uuid;

use shared_database::SharedStore;
use shared_models::{HealthRecord, MetricType, MetricValue};

use crate::models::MetricError;

const HISTORY_WINDOW_DAYS: i64 = 30;

/// Turns a raw `(type, value)` pair into a typed reading. A blood-pressure
/// value containing `/` becomes a systolic/diastolic pair; everything else
/// must be a single finite number.
pub fn parse_metric(metric_type: &str, metric_value: &str) -> Result<(MetricType, MetricValue), MetricError> {
    let kind: MetricType = metric_type
        .parse()
        .map_err(|_| MetricError::UnknownType(metric_type.to_string()))?;

    let invalid = || MetricError::InvalidValue {
        metric_type: kind.to_string(),
        value: metric_value.to_string(),
    };

    let raw = metric_value.trim();
    let value = match raw.split_once('/') {
        Some((systolic, diastolic)) if kind.is_composite() => MetricValue::BloodPressure {
            systolic: parse_number(systolic).ok_or_else(invalid)?,
            diastolic: parse_number(diastolic).ok_or_else(invalid)?,
        },
        _ => MetricValue::Scalar(parse_number(raw).ok_or_else(invalid)?),
    };

    Ok((kind, value))
}

/// Reads an optional caller-supplied timestamp. A bare date means midnight UTC;
/// blank counts as absent.
pub fn parse_recorded_at(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, MetricError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc()))
        .ok_or_else(|| MetricError::InvalidDate(raw.to_string()))
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub struct MetricLoggerService {
    store: SharedStore,
}

impl MetricLoggerService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Appends a reading stamped with the current server time.
    pub async fn log_metric(
        &self,
        metric_type: &str,
        metric_value: &str,
        user_id: &str,
    ) -> Result<HealthRecord, MetricError> {
        self.log_metric_at(metric_type, metric_value, user_id, Utc::now()).await
    }

    pub async fn log_metric_at(
        &self,
        metric_type: &str,
        metric_value: &str,
        user_id: &str,
        recorded_at: DateTime<Utc>,
    ) -> Result<HealthRecord, MetricError> {
        info!("Attempting to log: {} as {} for {}", metric_type, metric_value, user_id);

        let (metric_type, value) = parse_metric(metric_type, metric_value)?;

        let record = HealthRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            date: recorded_at,
            metric_type,
            value,
        };

        self.store.insert_health_record(&record).await.map_err(|e| {
            error!("Error logging {} for {}: {}", metric_type, user_id, e);
            MetricError::DatabaseError(e.to_string())
        })?;

        info!("Logged {} = {} for {}", record.metric_type, record.value, user_id);
        Ok(record)
    }

    /// Readings from the last 30 days, oldest first.
    pub async fn recent_records(&self, user_id: &str) -> Result<Vec<HealthRecord>, MetricError> {
        let since = Utc::now() - Duration::days(HISTORY_WINDOW_DAYS);
        self.store
            .find_health_records_since(user_id, since)
            .await
            .map_err(|e| MetricError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_pressure_is_split_into_pair() {
        let (kind, value) = parse_metric("bp", "120/80").unwrap();
        assert_eq!(kind, MetricType::Bp);
        assert_eq!(value, MetricValue::BloodPressure { systolic: 120.0, diastolic: 80.0 });

        let (_, spaced) = parse_metric("blood pressure", " 118 / 76 ").unwrap();
        assert_eq!(spaced, MetricValue::BloodPressure { systolic: 118.0, diastolic: 76.0 });
    }

    #[test]
    fn test_scalar_metrics() {
        assert_eq!(parse_metric("glucose", "105").unwrap().1, MetricValue::Scalar(105.0));
        assert_eq!(parse_metric("temp", "98.6").unwrap().1, MetricValue::Scalar(98.6));
        // bp without a separator stays scalar
        assert_eq!(parse_metric("bp", "120").unwrap().1, MetricValue::Scalar(120.0));
    }

    #[test]
    fn test_recorded_at_formats() {
        let stamped = parse_recorded_at(Some("2025-11-15T09:05:00+05:30")).unwrap().unwrap();
        assert_eq!(stamped.to_rfc3339(), "2025-11-15T03:35:00+00:00");

        let day = parse_recorded_at(Some("2025-11-15")).unwrap().unwrap();
        assert_eq!(day.to_rfc3339(), "2025-11-15T00:00:00+00:00");

        assert_eq!(parse_recorded_at(Some("  ")), Ok(None));
        assert_eq!(parse_recorded_at(None), Ok(None));
        assert_eq!(
            parse_recorded_at(Some("15/11/2025")),
            Err(MetricError::InvalidDate("15/11/2025".into()))
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            parse_metric("oxygen", "97"),
            Err(MetricError::UnknownType("oxygen".into()))
        );
        assert!(matches!(
            parse_metric("glucose", "high"),
            Err(MetricError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_metric("glucose", "120/80"),
            Err(MetricError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_metric("bp", "120/"),
            Err(MetricError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_metric("weight", "NaN"),
            Err(MetricError::InvalidValue { .. })
        ));
    }
}
