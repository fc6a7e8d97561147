use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::languages::LanguageConfig;
use self::logging::LoggingConfig;
use self::translator::TranslatorConfig;

pub mod languages;
pub mod logging;
pub mod translator;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub languages: LanguageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Defaults overridden by `TOLK_*` environment variables
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Read a JSON profile, then let the environment override it
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        self.translator.apply_env();
        self.languages.apply_env();
        self.logging.apply_env();
    }
}

pub(crate) fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.trim().parse().ok())
}
