use tolk_core::{LanguageCode, TranslationRequest};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum AppEvent {
    TranslateRequest {
        id: Uuid,
        request: TranslationRequest,
    },
    ListModels,
    InvalidInput {
        line: String,
        reason: String,
    },
    DownloadState {
        id: Uuid,
        downloading: bool,
    },
    ShowModels(Vec<LanguageCode>),
    ShowTranslation {
        id: Uuid,
        text: String,
        from_lang: LanguageCode,
        to_lang: LanguageCode,
    },
    TranslationFailed {
        id: Uuid,
        error: String,
    },
}
