use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_USER_ID: &str = "user-nitin-123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Supabase,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Supabase => write!(f, "supabase"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY must be set")]
    MissingGeminiKey,

    #[error("STORE_BACKEND=supabase requires {0}")]
    MissingSupabaseSetting(&'static str),

    #[error("LLM_TIMEOUT_SECS must be greater than zero")]
    InvalidTimeout,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_secs: u64,
    pub default_user_id: String,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            Some("supabase") => StoreBackend::Supabase,
            Some("memory") | None => StoreBackend::Memory,
            Some(other) => {
                warn!("Unknown STORE_BACKEND '{}', falling back to memory", other);
                StoreBackend::Memory
            }
        };

        let port = lookup("PORT")
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| {
                warn!("PORT not set or invalid, using 8080");
                8080
            });

        let llm_timeout_secs = lookup("LLM_TIMEOUT_SECS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(20);

        let seed_demo_data = lookup("SEED_DEMO_DATA")
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(store_backend == StoreBackend::Memory);

        let config = Self {
            port,
            store_backend,
            supabase_url: lookup("SUPABASE_URL").unwrap_or_else(|| {
                if store_backend == StoreBackend::Supabase {
                    warn!("SUPABASE_URL not set, using empty value");
                }
                String::new()
            }),
            supabase_service_key: lookup("SUPABASE_SERVICE_KEY").unwrap_or_else(|| {
                if store_backend == StoreBackend::Supabase {
                    warn!("SUPABASE_SERVICE_KEY not set, using empty value");
                }
                String::new()
            }),
            gemini_api_key: lookup("GEMINI_API_KEY").unwrap_or_else(|| {
                warn!("GEMINI_API_KEY not set, using empty value");
                String::new()
            }),
            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            llm_timeout_secs,
            default_user_id: lookup("DEFAULT_USER_ID")
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            seed_demo_data,
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        self.validate().is_ok()
    }

    /// Startup check: the process refuses to serve without an LLM credential or
    /// with a half-configured Supabase backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingGeminiKey);
        }

        if self.store_backend == StoreBackend::Supabase {
            if self.supabase_url.is_empty() {
                return Err(ConfigError::MissingSupabaseSetting("SUPABASE_URL"));
            }
            if self.supabase_service_key.is_empty() {
                return Err(ConfigError::MissingSupabaseSetting("SUPABASE_SERVICE_KEY"));
            }
        }

        if self.llm_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_use_memory_backend_and_seed() {
        let config = config_from(&[("GEMINI_API_KEY", "key")]);

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_user_id, DEFAULT_USER_ID);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.llm_timeout(), Duration::from_secs(20));
        assert!(config.seed_demo_data);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_gemini_key_fails_validation() {
        let config = config_from(&[]);
        assert_eq!(config.validate(), Err(ConfigError::MissingGeminiKey));
        assert!(!config.is_configured());
    }

    #[test]
    fn test_supabase_backend_requires_url_and_key() {
        let config = config_from(&[("GEMINI_API_KEY", "key"), ("STORE_BACKEND", "supabase")]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingSupabaseSetting("SUPABASE_URL"))
        );
        assert!(!config.seed_demo_data);

        let config = config_from(&[
            ("GEMINI_API_KEY", "key"),
            ("STORE_BACKEND", "supabase"),
            ("SUPABASE_URL", "http://localhost:54321"),
            ("SUPABASE_SERVICE_KEY", "service"),
        ]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = config_from(&[("GEMINI_API_KEY", "key"), ("LLM_TIMEOUT_SECS", "0")]);
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeout));
    }

    #[test]
    fn test_seed_flag_override() {
        let config = config_from(&[("GEMINI_API_KEY", "key"), ("SEED_DEMO_DATA", "false")]);
        assert!(!config.seed_demo_data);
    }
}
