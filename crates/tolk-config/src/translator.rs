use serde::{Deserialize, Serialize};

use crate::{env_parse, env_string};

fn default_provider() -> String {
    "mock".to_string()
}

fn default_api_url() -> String {
    "http://127.0.0.1:7070".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Which provider backs the facade and how to reach it
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// `mock` for the in-memory provider, `http` for the model service
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl TranslatorConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Some(provider) = env_string("TOLK_PROVIDER") {
            self.provider = provider;
        }
        if let Some(api_url) = env_string("TOLK_API_URL") {
            self.api_url = api_url;
        }
        if let Some(api_key) = env_string("TOLK_API_KEY") {
            self.api_key = api_key;
        }
        if let Some(timeout) = env_parse("TOLK_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout;
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: default_api_url(),
            api_key: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
