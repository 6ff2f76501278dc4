use tracing::{error, info, warn};

use appointment_cell::{AppointmentBookingService, AppointmentError};
use health_tracker_cell::api::MetricLoggerService;
use health_tracker_cell::MetricError;
use patient_cell::PatientHistoryService;
use shared_database::SharedStore;

use crate::models::{ChatAction, ChatError, ChatTurn, ResolvedIntent, RESOLVER_FAILURE_REPLY};
use crate::services::resolver::SharedResolver;

pub const BOOKING_DETAILS_MISSING_REPLY: &str =
    "I'm sorry, I found a slot but missed the details. Could you please ask again?";
pub const METRIC_DETAILS_MISSING_REPLY: &str =
    "I understood you want to log a metric, but I missed the details. Could you please state it again, like 'log my bp 120/80'?";

/// Applies at most one side effect per chat turn and decides the final reply.
///
/// Resolver failures degrade to a fixed apology and never reach the caller as
/// errors. Store failures while executing an action come back as
/// [`ChatError::Action`].
pub struct ActionDispatcher {
    store: SharedStore,
    resolver: SharedResolver,
}

impl ActionDispatcher {
    pub fn new(store: SharedStore, resolver: SharedResolver) -> Self {
        Self { store, resolver }
    }

    pub async fn reply(&self, user_id: &str, history: &[ChatTurn]) -> Result<String, ChatError> {
        let intent = match self.resolver.resolve(user_id, history).await {
            Ok(intent) => intent,
            Err(e) => {
                error!("Intent resolution failed for {}: {}", user_id, e);
                return Ok(RESOLVER_FAILURE_REPLY.to_string());
            }
        };

        self.dispatch(user_id, intent).await
    }

    pub async fn dispatch(&self, user_id: &str, intent: ResolvedIntent) -> Result<String, ChatError> {
        match intent.action {
            ChatAction::None => Ok(intent.reply),
            ChatAction::BookAppointment => self.book_appointment(user_id, intent).await,
            ChatAction::LogMetric => self.log_metric(user_id, intent).await,
            ChatAction::GetHistory => self.history(user_id).await,
        }
    }

    async fn book_appointment(&self, user_id: &str, intent: ResolvedIntent) -> Result<String, ChatError> {
        let Some((doctor_name, slot_iso)) = intent.parameters.booking() else {
            warn!("BookAppointment intent without doctorName/slotISO");
            return Ok(BOOKING_DETAILS_MISSING_REPLY.to_string());
        };

        let booking = AppointmentBookingService::new(self.store.clone());
        match booking.book_slot(doctor_name, slot_iso, user_id).await {
            Ok(appointment) => {
                info!("Chat booking {} confirmed for {}", appointment.id, user_id);
                Ok(intent.reply)
            }
            Err(AppointmentError::DatabaseError(msg)) => Err(ChatError::Action(msg)),
            Err(e) => {
                warn!("Chat booking rejected: {}", e);
                Ok(format!(
                    "Oh no! It looks like that slot ({} at {}) was just taken. Please ask for another time.",
                    doctor_name, slot_iso
                ))
            }
        }
    }

    async fn log_metric(&self, user_id: &str, intent: ResolvedIntent) -> Result<String, ChatError> {
        let Some((metric_type, metric_value)) = intent.parameters.metric() else {
            warn!("LogMetric intent without metricType/metricValue");
            return Ok(METRIC_DETAILS_MISSING_REPLY.to_string());
        };

        let logger = MetricLoggerService::new(self.store.clone());
        match logger.log_metric(metric_type, metric_value, user_id).await {
            Ok(_) => Ok(intent.reply),
            Err(MetricError::DatabaseError(msg)) => Err(ChatError::Action(msg)),
            Err(e) => {
                warn!("Chat metric rejected: {}", e);
                Ok(format!(
                    "I couldn't log that reading ({}). Could you please state it again, like 'log my bp 120/80'?",
                    e
                ))
            }
        }
    }

    async fn history(&self, user_id: &str) -> Result<String, ChatError> {
        PatientHistoryService::new(self.store.clone())
            .history_summary(user_id)
            .await
            .map_err(|e| ChatError::Action(e.to_string()))
    }
}
