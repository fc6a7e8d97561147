use tolk_translator::ProviderError;

use crate::language::LanguageCode;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FacadeError {
    /// Caller passed a code outside the supported set; raised before any I/O
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Model download failed for {code}: {source}")]
    ModelDownloadFailed {
        code: LanguageCode,
        #[source]
        source: ProviderError,
    },

    #[error(transparent)]
    TranslationFailed(ProviderError),

    #[error("Translation cancelled")]
    Cancelled,
}
