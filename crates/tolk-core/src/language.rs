use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tolk_translator::ProviderLanguage;

use crate::error::FacadeError;

/// Language codes this system accepts.
///
/// Adding a language means adding a variant here and its arm in
/// [`LanguageCode::provider_language`] and [`LanguageCode::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    De,
    En,
    Fr,
    It,
    Es,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 5] = [
        LanguageCode::De,
        LanguageCode::En,
        LanguageCode::Fr,
        LanguageCode::It,
        LanguageCode::Es,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::De => "de",
            LanguageCode::En => "en",
            LanguageCode::Fr => "fr",
            LanguageCode::It => "it",
            LanguageCode::Es => "es",
        }
    }

    pub fn provider_language(self) -> ProviderLanguage {
        match self {
            LanguageCode::De => ProviderLanguage::German,
            LanguageCode::En => ProviderLanguage::English,
            LanguageCode::Fr => ProviderLanguage::French,
            LanguageCode::It => ProviderLanguage::Italian,
            LanguageCode::Es => ProviderLanguage::Spanish,
        }
    }
}

/// Codes in display order, for language pickers
pub fn supported_languages() -> &'static [LanguageCode] {
    &LanguageCode::ALL
}

impl FromStr for LanguageCode {
    type Err = FacadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LanguageCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FacadeError::UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
