use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tolk_config::Config;
use tolk_core::{LanguageCode, TranslationFacade};
use tolk_remote::HttpProvider;
use tolk_translator::{MockProvider, Translator};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub facade: Arc<TranslationFacade>,
    pub default_pair: (LanguageCode, LanguageCode),
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let default_pair: (LanguageCode, LanguageCode) = (
            config.languages.source.parse()?,
            config.languages.target.parse()?,
        );
        let facade = build_facade(&config)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            facade: Arc::new(facade),
            default_pair,
        })
    }
}

fn build_facade(config: &Config) -> anyhow::Result<TranslationFacade> {
    let translator = &config.translator;
    match translator.provider.as_str() {
        "mock" => {
            let provider = MockProvider::new();
            tracing::warn!("Using in-memory {} provider", provider.metadata().name);
            Ok(TranslationFacade::from_provider(Arc::new(provider)))
        }
        "http" => {
            tracing::info!("Using model service at {}", translator.api_url);
            let provider = HttpProvider::new(
                translator.api_url.clone(),
                translator.api_key.clone(),
                Duration::from_secs(translator.timeout_seconds),
            )?;
            let metadata = provider.metadata();
            tracing::debug!(
                "Provider {} (on device: {}, keyed: {})",
                metadata.name,
                metadata.on_device,
                metadata.requires_api_key
            );
            Ok(TranslationFacade::from_provider(Arc::new(provider)))
        }
        other => anyhow::bail!("unknown translator provider: {other}"),
    }
}
