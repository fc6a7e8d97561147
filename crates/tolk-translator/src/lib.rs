use std::fmt;

pub mod mock;

pub use mock::MockProvider;

/// Model management interface of an on-device translation provider
#[async_trait::async_trait]
pub trait ModelProvider: Send + Sync {
    /// Make the model for `language` available on the device.
    ///
    /// Must be idempotent: asking for an already present model succeeds.
    async fn download_model(&self, language: ProviderLanguage) -> Result<(), ProviderError>;
}

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        source: ProviderLanguage,
        target: ProviderLanguage,
    ) -> Result<String, ProviderError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Languages as the provider enumerates them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderLanguage {
    Chinese,
    Dutch,
    English,
    French,
    German,
    Italian,
    Japanese,
    Korean,
    Polish,
    Portuguese,
    Russian,
    Spanish,
    Swedish,
    Turkish,
}

impl ProviderLanguage {
    /// BCP-47 tag the provider uses on the wire
    pub fn tag(self) -> &'static str {
        match self {
            ProviderLanguage::Chinese => "zh",
            ProviderLanguage::Dutch => "nl",
            ProviderLanguage::English => "en",
            ProviderLanguage::French => "fr",
            ProviderLanguage::German => "de",
            ProviderLanguage::Italian => "it",
            ProviderLanguage::Japanese => "ja",
            ProviderLanguage::Korean => "ko",
            ProviderLanguage::Polish => "pl",
            ProviderLanguage::Portuguese => "pt",
            ProviderLanguage::Russian => "ru",
            ProviderLanguage::Spanish => "es",
            ProviderLanguage::Swedish => "sv",
            ProviderLanguage::Turkish => "tr",
        }
    }
}

impl fmt::Display for ProviderLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub on_device: bool,
    pub requires_api_key: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model unavailable for {0}")]
    ModelUnavailable(ProviderLanguage),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_lowercase_two_letter_codes() {
        for language in [
            ProviderLanguage::English,
            ProviderLanguage::German,
            ProviderLanguage::Swedish,
        ] {
            let tag = language.tag();
            assert_eq!(tag.len(), 2);
            assert_eq!(tag, tag.to_lowercase());
        }
        assert_eq!(ProviderLanguage::German.to_string(), "de");
    }

    #[test]
    fn model_unavailable_names_the_language() {
        let err = ProviderError::ModelUnavailable(ProviderLanguage::French);
        assert_eq!(err.to_string(), "Model unavailable for fr");
    }
}
