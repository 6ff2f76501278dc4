pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use router::doctor_routes;
pub use services::doctor::DoctorDirectoryService;
pub use services::matching::{SymptomAnalysisService, DEFAULT_SPECIALTY};
