use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::{AppConfig, StoreBackend};
use shared_database::{ClinicState, MemoryStore, SeedData};

pub const TEST_USER_ID: &str = "user-nitin-123";

pub struct TestConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub supabase_url: String,
    pub llm_timeout_secs: u64,
    pub default_user_id: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: "test-gemini-key".to_string(),
            gemini_base_url: "http://localhost:9".to_string(),
            gemini_model: "gemini-test".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            llm_timeout_secs: 5,
            default_user_id: TEST_USER_ID.to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_gemini_url(uri: &str) -> Self {
        Self {
            gemini_base_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            port: 0,
            store_backend: StoreBackend::Memory,
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: "test-service-key".to_string(),
            gemini_api_key: self.gemini_api_key.clone(),
            gemini_model: self.gemini_model.clone(),
            gemini_base_url: self.gemini_base_url.clone(),
            llm_timeout_secs: self.llm_timeout_secs,
            default_user_id: self.default_user_id.clone(),
            seed_demo_data: true,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Router state over an in-memory store loaded with the demo roster.
pub async fn seeded_state() -> ClinicState {
    seeded_state_with(TestConfig::default()).await
}

pub async fn seeded_state_with(config: TestConfig) -> ClinicState {
    let store = MemoryStore::with_seed(&SeedData::demo()).await;
    ClinicState::new(config.to_arc(), Arc::new(store))
}

pub async fn empty_state() -> ClinicState {
    ClinicState::new(TestConfig::default().to_arc(), Arc::new(MemoryStore::new()))
}

pub struct MockGeminiResponses;

impl MockGeminiResponses {
    /// Wraps a structured intent the way `generateContent` returns JSON mode
    /// output: as text inside the first candidate part.
    pub fn intent(intent: Value) -> Value {
        json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": intent.to_string() }]
                },
                "finishReason": "STOP"
            }]
        })
    }

    pub fn reply_only(reply: &str) -> Value {
        Self::intent(json!({ "action": "None", "reply": reply }))
    }

    pub fn empty_candidates() -> Value {
        json!({ "candidates": [] })
    }

    pub fn error_response(message: &str, code: u16) -> Value {
        json!({
            "error": {
                "code": code,
                "message": message,
                "status": "INVALID_ARGUMENT"
            }
        })
    }
}
