// libs/appointment-cell/src/services/booking.rs
use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use shared_database::SharedStore;
use shared_models::Appointment;

use crate::models::{AppointmentError, SlotLabels};

/// Books doctor slots. The store's conditional slot pull is the only point
/// of truth for availability; nothing here re-reads it.
pub struct AppointmentBookingService {
    store: SharedStore,
}

impl AppointmentBookingService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Atomically consumes `slot_iso` from the doctor's availability and
    /// records the appointment. Calling it again with the same arguments fails
    /// with [`AppointmentError::SlotUnavailable`].
    pub async fn book_slot(
        &self,
        doctor_name: &str,
        slot_iso: &str,
        user_id: &str,
    ) -> Result<Appointment, AppointmentError> {
        info!("Attempting to book: {} at {} for {}", doctor_name, slot_iso, user_id);

        if doctor_name.trim().is_empty() || slot_iso.trim().is_empty() {
            return Err(AppointmentError::ValidationError(
                "doctorName and slotISO are required".to_string(),
            ));
        }

        let labels = SlotLabels::from_slot(slot_iso)?;

        let pulled = self
            .store
            .pull_doctor_slot(doctor_name, slot_iso)
            .await
            .map_err(|e| {
                error!("Slot pull failed for {} at {}: {}", doctor_name, slot_iso, e);
                AppointmentError::DatabaseError(e.to_string())
            })?;

        if !pulled {
            warn!("Booking failed: {} at {} was just taken or doesn't exist", doctor_name, slot_iso);
            return Err(AppointmentError::SlotUnavailable {
                doctor_name: doctor_name.to_string(),
                slot_iso: slot_iso.to_string(),
            });
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            doctor_name: doctor_name.to_string(),
            specialty: self.lookup_specialty(doctor_name).await,
            date: labels.date,
            time: labels.time,
            slot_iso: slot_iso.to_string(),
            booked_at: Utc::now(),
        };

        if let Err(e) = self.store.insert_appointment(&appointment).await {
            // The slot is already gone at this point; surface it loudly.
            error!(
                "Slot {} with {} was consumed but the appointment was not saved: {}",
                slot_iso, doctor_name, e
            );
            return Err(AppointmentError::DatabaseError(e.to_string()));
        }

        info!("Appointment {} booked with {} at {}", appointment.id, doctor_name, slot_iso);
        Ok(appointment)
    }

    pub async fn appointments_for(&self, user_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        self.store
            .find_appointments(user_id)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    /// Best effort: a missing doctor record or lookup failure yields "".
    async fn lookup_specialty(&self, doctor_name: &str) -> String {
        match self.store.find_doctor_by_name(doctor_name).await {
            Ok(Some(doctor)) => doctor.specialization,
            Ok(None) => String::new(),
            Err(e) => {
                debug!("Specialty lookup for {} failed: {}", doctor_name, e);
                String::new()
            }
        }
    }
}
