pub mod memory;
pub mod postgrest;
pub mod seed;
pub mod state;
pub mod store;
pub mod supabase;

use std::sync::Arc;

use shared_config::{AppConfig, StoreBackend};
use tracing::info;

pub use memory::MemoryStore;
pub use postgrest::SupabaseStore;
pub use seed::{seed_demo_data, SeedData};
pub use state::ClinicState;
pub use store::{ClinicStore, SharedStore};

/// Selects the store implementation named by `STORE_BACKEND`.
pub fn connect_store(config: &AppConfig) -> SharedStore {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory clinic store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Supabase => {
            info!("Using Supabase clinic store at {}", config.supabase_url);
            Arc::new(SupabaseStore::new(config))
        }
    }
}
