use serde::{Deserialize, Serialize};

use crate::{env_parse, env_string};

fn default_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Some(filter) = env_string("TOLK_LOG_FILTER") {
            self.filter = filter;
        }
        if let Some(json) = env_parse("TOLK_LOG_JSON") {
            self.json = json;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}
