// Health tracker cell: metric logging and the 30-day history view.
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{LogMetricRequest, MetricError, MetricInput};
pub use router::health_tracker_routes;

pub mod api {
    pub use crate::services::metrics::{parse_metric, parse_recorded_at, MetricLoggerService};
}
