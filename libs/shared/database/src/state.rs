use std::sync::Arc;

use shared_config::AppConfig;

use crate::store::SharedStore;

/// Router state shared by every cell: the resolved config plus the store.
#[derive(Clone)]
pub struct ClinicState {
    pub config: Arc<AppConfig>,
    pub store: SharedStore,
}

impl ClinicState {
    pub fn new(config: Arc<AppConfig>, store: SharedStore) -> Self {
        Self { config, store }
    }

    /// Falls back to the configured demo user when a request carries no id.
    pub fn resolve_user_id(&self, user_id: Option<&str>) -> String {
        match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.config.default_user_id.clone(),
        }
    }
}
