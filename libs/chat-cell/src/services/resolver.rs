use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_database::SharedStore;

use crate::models::{ChatError, ChatTurn, IntentPayload, ResolvedIntent};
use crate::services::prompt::{build_system_prompt, response_schema, Grounding, MODEL_ACKNOWLEDGEMENT};

pub type SharedResolver = Arc<dyn IntentResolver>;

/// Turns a conversation into a structured intent.
#[async_trait]
pub trait IntentResolver: Send + Sync {
    async fn resolve(&self, user_id: &str, history: &[ChatTurn]) -> Result<ResolvedIntent, ChatError>;
}

pub struct GeminiIntentResolver {
    http_client: Client,
    store: SharedStore,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiIntentResolver {
    pub fn new(config: &AppConfig, store: SharedStore) -> Self {
        Self {
            http_client: Client::new(),
            store,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            timeout: config.llm_timeout(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn load_grounding(&self, user_id: &str) -> Result<Grounding, ChatError> {
        let (doctors, patient, symptom_map) = tokio::try_join!(
            self.store.list_doctors(),
            self.store.find_patient(user_id),
            self.store.list_symptom_mappings(),
        )
        .map_err(|e| ChatError::Grounding(e.to_string()))?;

        Ok(Grounding {
            doctors,
            patient,
            symptom_map,
        })
    }

    fn build_payload(
        &self,
        user_id: &str,
        history: &[ChatTurn],
        grounding: &Grounding,
    ) -> Result<Value, ChatError> {
        let system_prompt = build_system_prompt(user_id, Utc::now(), grounding)
            .map_err(|e| ChatError::Grounding(e.to_string()))?;

        let mut contents = vec![ChatTurn::user(&system_prompt), ChatTurn::model(MODEL_ACKNOWLEDGEMENT)];
        contents.extend_from_slice(history);

        Ok(json!({
            "contents": contents,
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        }))
    }

    async fn call_model(&self, user_id: &str, history: &[ChatTurn]) -> Result<ResolvedIntent, ChatError> {
        let grounding = self.load_grounding(user_id).await?;
        let payload = self.build_payload(user_id, history, &grounding)?;

        if let Some(latest) = history.last().and_then(ChatTurn::text) {
            debug!("Sending to Gemini: {}", latest);
        }

        let response = self
            .http_client
            .post(self.endpoint())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChatError::Resolver(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(ChatError::Resolver(format!("Gemini API request failed with {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ChatError::MalformedResponse("no candidate text in response".to_string()))?;

        let intent: IntentPayload = serde_json::from_str(text).map_err(|e| {
            warn!("Gemini returned non-JSON intent: {}", text);
            ChatError::MalformedResponse(e.to_string())
        })?;

        let intent = ResolvedIntent::from(intent);
        debug!("Gemini intent: {:?}", intent.action);
        Ok(intent)
    }
}

#[async_trait]
impl IntentResolver for GeminiIntentResolver {
    async fn resolve(&self, user_id: &str, history: &[ChatTurn]) -> Result<ResolvedIntent, ChatError> {
        tokio::time::timeout(self.timeout, self.call_model(user_id, history))
            .await
            .map_err(|_| ChatError::Timeout(self.timeout.as_secs()))?
    }
}
