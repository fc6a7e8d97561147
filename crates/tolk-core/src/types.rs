use crate::error::FacadeError;
use crate::language::LanguageCode;

/// A single translation ask, validated on construction
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: &str, target: &str) -> Result<Self, FacadeError> {
        Ok(Self {
            text: text.into(),
            source: source.parse()?,
            target: target.parse()?,
        })
    }
}
