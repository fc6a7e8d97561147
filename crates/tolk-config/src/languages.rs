use serde::{Deserialize, Serialize};

use crate::{env_parse, env_string};

fn default_source() -> String {
    "en".to_string()
}

fn default_target() -> String {
    "de".to_string()
}

fn default_prefetch() -> bool {
    true
}

/// Default language pair; codes stay strings here and are validated by the facade
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LanguageConfig {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_target")]
    pub target: String,
    /// Download the default pair's models at startup
    #[serde(default = "default_prefetch")]
    pub prefetch: bool,
}

impl LanguageConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Some(source) = env_string("TOLK_SOURCE_LANG") {
            self.source = source;
        }
        if let Some(target) = env_string("TOLK_TARGET_LANG") {
            self.target = target;
        }
        if let Some(prefetch) = env_parse("TOLK_PREFETCH") {
            self.prefetch = prefetch;
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            target: default_target(),
            prefetch: default_prefetch(),
        }
    }
}
