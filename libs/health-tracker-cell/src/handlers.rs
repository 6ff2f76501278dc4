use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::ClinicState;
use shared_models::error::AppError;
use shared_models::HealthRecord;

use crate::models::{LogMetricRequest, MetricError};
use crate::services::metrics::{parse_recorded_at, MetricLoggerService};

impl From<MetricError> for AppError {
    fn from(e: MetricError) -> Self {
        match e {
            MetricError::DatabaseError(msg) => AppError::Database(msg),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn get_health_records(
    State(state): State<ClinicState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<HealthRecord>>, AppError> {
    let logger = MetricLoggerService::new(state.store.clone());
    let records = logger.recent_records(&user_id).await?;
    Ok(Json(records))
}

#[axum::debug_handler]
pub async fn log_health_metric(
    State(state): State<ClinicState>,
    Path(user_id): Path<String>,
    Json(request): Json<LogMetricRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let metric_type = request
        .metric_type
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(MetricError::MissingField("type"))?;
    let value = request
        .value
        .as_ref()
        .map(|v| v.as_text())
        .ok_or(MetricError::MissingField("value"))?;

    let recorded_at = parse_recorded_at(request.date.as_deref())?;

    let logger = MetricLoggerService::new(state.store.clone());
    let record = match recorded_at {
        Some(date) => logger.log_metric_at(metric_type, &value, &user_id, date).await?,
        None => logger.log_metric(metric_type, &value, &user_id).await?,
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Metric logged",
            "record": record
        })),
    ))
}
