use tolk_translator::{MockProvider, ProviderError, ProviderLanguage};

use super::{Recorder, facade};
use crate::error::FacadeError;
use crate::language::LanguageCode;
use crate::types::TranslationRequest;

fn english_to_german() -> MockProvider {
    MockProvider::new()
        .with_translation("Hello", ProviderLanguage::English, ProviderLanguage::German, "Hallo")
        .with_translation("Hallo", ProviderLanguage::German, ProviderLanguage::English, "Hello")
}

#[tokio::test]
async fn cold_start_downloads_both_models_then_translates() {
    let (facade, provider) = facade(english_to_german());
    let recorder = Recorder::default();

    let text = facade
        .translate("Hello", "en", "de", Some(&recorder))
        .await
        .unwrap();

    assert_eq!(text, "Hallo");
    assert_eq!(recorder.states(), vec![true, false]);
    assert_eq!(provider.download_count(ProviderLanguage::English), 1);
    assert_eq!(provider.download_count(ProviderLanguage::German), 1);
    assert_eq!(facade.downloaded(), vec![LanguageCode::De, LanguageCode::En]);

    let calls = provider.translations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].source, ProviderLanguage::English);
    assert_eq!(calls[0].target, ProviderLanguage::German);
}

#[tokio::test]
async fn warm_cache_skips_downloads_and_observer() {
    let (facade, provider) = facade(english_to_german());
    facade.translate("Hello", "en", "de", None).await.unwrap();

    let recorder = Recorder::default();
    let text = facade
        .translate("Hallo", "de", "en", Some(&recorder))
        .await
        .unwrap();

    assert_eq!(text, "Hello");
    assert!(recorder.states().is_empty());
    assert_eq!(provider.downloads().len(), 2);
    assert_eq!(provider.translations().len(), 2);
}

#[tokio::test]
async fn cached_code_is_never_downloaded_again() {
    let (facade, provider) = facade(MockProvider::new());
    facade.ensure_model("en").await.unwrap();

    facade.translate("a", "en", "fr", None).await.unwrap();
    facade.translate("b", "it", "en", None).await.unwrap();

    assert_eq!(provider.download_count(ProviderLanguage::English), 1);
    assert_eq!(provider.download_count(ProviderLanguage::French), 1);
    assert_eq!(provider.download_count(ProviderLanguage::Italian), 1);
}

#[tokio::test]
async fn same_source_and_target_downloads_once() {
    let (facade, provider) = facade(MockProvider::new());
    let recorder = Recorder::default();

    let text = facade.translate("Hi", "en", "en", Some(&recorder)).await.unwrap();

    assert_eq!(text, "[en] Hi");
    assert_eq!(provider.downloads(), vec![ProviderLanguage::English]);
    assert_eq!(recorder.states(), vec![true, false]);
}

#[tokio::test]
async fn partial_download_failure_keeps_successful_model() {
    let (facade, provider) = facade(MockProvider::new().fail_download(ProviderLanguage::French));
    let recorder = Recorder::default();

    let err = facade
        .translate("Hello", "en", "fr", Some(&recorder))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FacadeError::ModelDownloadFailed {
            code: LanguageCode::Fr,
            source: ProviderError::ModelUnavailable(ProviderLanguage::French),
        }
    );
    assert!(facade.is_downloaded(LanguageCode::En));
    assert!(!facade.is_downloaded(LanguageCode::Fr));
    assert_eq!(recorder.states(), vec![true, false]);
    assert!(provider.translations().is_empty());
}

#[tokio::test]
async fn failed_download_is_attempted_again_by_next_call() {
    let (facade, provider) = facade(MockProvider::new().fail_download(ProviderLanguage::French));

    assert!(facade.translate("x", "en", "fr", None).await.is_err());
    assert!(facade.translate("x", "en", "fr", None).await.is_err());

    assert_eq!(provider.download_count(ProviderLanguage::French), 2);
    assert_eq!(provider.download_count(ProviderLanguage::English), 1);
}

#[tokio::test]
async fn unsupported_code_makes_no_provider_calls() {
    let (facade, provider) = facade(MockProvider::new());
    let recorder = Recorder::default();

    let source_err = facade
        .translate("text", "xx", "en", Some(&recorder))
        .await
        .unwrap_err();
    let target_err = facade
        .translate("text", "en", "klingon", Some(&recorder))
        .await
        .unwrap_err();

    assert_eq!(source_err, FacadeError::UnsupportedLanguage("xx".to_string()));
    assert_eq!(target_err, FacadeError::UnsupportedLanguage("klingon".to_string()));
    assert_eq!(provider.call_count(), 0);
    assert!(recorder.states().is_empty());
}

#[tokio::test]
async fn translation_failure_is_surfaced_verbatim() {
    let (facade, _provider) = facade(MockProvider::new().fail_translate());

    let err = facade.translate("Hello", "en", "es", None).await.unwrap_err();

    assert_eq!(
        err,
        FacadeError::TranslationFailed(ProviderError::Api("mock translate failure".to_string()))
    );
    assert_eq!(err.to_string(), "API error: mock translate failure");
    // models fetched before the failing call stay recorded
    assert!(facade.is_downloaded(LanguageCode::Es));
}

#[tokio::test]
async fn empty_text_is_passed_through() {
    let (facade, provider) = facade(MockProvider::new());

    let text = facade.translate("", "de", "it", None).await.unwrap();

    assert_eq!(text, "[it] ");
    assert_eq!(provider.translations()[0].text, "");
}

#[tokio::test]
async fn request_entry_point_matches_string_entry_point() {
    let (facade, _provider) = facade(english_to_german());
    let request = TranslationRequest::new("Hello", "en", "de").unwrap();

    let text = facade.translate_request(&request, None).await.unwrap();

    assert_eq!(text, "Hallo");
    assert!(TranslationRequest::new("Hello", "en", "zz").is_err());
}

#[tokio::test]
async fn prefetch_warms_cache_with_balanced_signal() {
    let (facade, provider) = facade(MockProvider::new());
    let recorder = Recorder::default();

    facade
        .prefetch(&[LanguageCode::It, LanguageCode::Es, LanguageCode::It], Some(&recorder))
        .await
        .unwrap();
    facade
        .prefetch(&[LanguageCode::It], Some(&recorder))
        .await
        .unwrap();

    assert_eq!(recorder.states(), vec![true, false]);
    assert_eq!(provider.downloads().len(), 2);
    assert_eq!(facade.downloaded(), vec![LanguageCode::It, LanguageCode::Es]);
}

#[tokio::test]
async fn closure_observer_is_accepted() {
    let (facade, _provider) = facade(MockProvider::new());
    let (tx, rx) = tokio::sync::watch::channel(false);
    let changes = std::sync::atomic::AtomicUsize::new(0);
    let observer = |downloading: bool| {
        changes.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        tx.send_replace(downloading);
    };

    facade.translate("a", "fr", "de", Some(&observer)).await.unwrap();

    assert_eq!(changes.load(std::sync::atomic::Ordering::SeqCst), 2);
    assert!(!*rx.borrow());
}
