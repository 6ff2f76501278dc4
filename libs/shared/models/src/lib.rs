pub mod appointment;
pub mod doctor;
pub mod error;
pub mod health;
pub mod patient;
pub mod symptom;

pub use appointment::Appointment;
pub use doctor::{Doctor, DoctorStatus};
pub use health::{HealthRecord, MetricType, MetricValue, UnknownMetricType};
pub use patient::{HistoryField, Patient};
pub use symptom::SymptomMapping;
