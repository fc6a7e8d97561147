use std::sync::Arc;

use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;
use tolk_translator::{ModelProvider, Translator};

use crate::cache::ModelCache;
use crate::error::FacadeError;
use crate::language::LanguageCode;
use crate::progress::{DownloadObserver, DownloadSignal};
use crate::types::TranslationRequest;

/// Makes sure models are on the device, then translates.
///
/// Holds no per-call state; the only thing shared between calls is the
/// [`ModelCache`]. Build one facade per process and share it.
pub struct TranslationFacade {
    models: Arc<dyn ModelProvider>,
    translator: Arc<dyn Translator>,
    cache: Arc<ModelCache>,
}

impl TranslationFacade {
    pub fn new(models: Arc<dyn ModelProvider>, translator: Arc<dyn Translator>) -> Self {
        Self::with_cache(models, translator, Arc::new(ModelCache::new()))
    }

    /// Facade over a provider that does both model management and translation
    pub fn from_provider<P>(provider: Arc<P>) -> Self
    where
        P: ModelProvider + Translator + 'static,
    {
        Self::new(provider.clone(), provider)
    }

    pub fn with_cache(
        models: Arc<dyn ModelProvider>,
        translator: Arc<dyn Translator>,
        cache: Arc<ModelCache>,
    ) -> Self {
        Self {
            models,
            translator,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<ModelCache> {
        &self.cache
    }

    pub fn is_downloaded(&self, code: LanguageCode) -> bool {
        self.cache.contains(code)
    }

    /// Codes whose model is known to be present, sorted
    pub fn downloaded(&self) -> Vec<LanguageCode> {
        self.cache.snapshot()
    }

    /// Translate `text`, downloading missing models first.
    ///
    /// Both codes are validated before the provider is touched. When at least
    /// one model has to be fetched, `observer` sees `true` before the first
    /// download and `false` once all of them settled.
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
        observer: Option<&dyn DownloadObserver>,
    ) -> Result<String, FacadeError> {
        let source: LanguageCode = source.parse()?;
        let target: LanguageCode = target.parse()?;
        self.translate_codes(text, source, target, observer).await
    }

    pub async fn translate_request(
        &self,
        request: &TranslationRequest,
        observer: Option<&dyn DownloadObserver>,
    ) -> Result<String, FacadeError> {
        self.translate_codes(&request.text, request.source, request.target, observer)
            .await
    }

    pub async fn translate_codes(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
        observer: Option<&dyn DownloadObserver>,
    ) -> Result<String, FacadeError> {
        self.ensure_models(&[source, target], observer).await?;

        tracing::debug!(%source, %target, chars = text.len(), "translating");
        self.translator
            .translate(text, source.provider_language(), target.provider_language())
            .await
            .map_err(|e| {
                tracing::warn!(%source, %target, "translation failed: {e}");
                FacadeError::TranslationFailed(e)
            })
    }

    /// Like [`translate`](Self::translate), but gives up with
    /// [`FacadeError::Cancelled`] once `cancel` fires.
    pub async fn translate_until_cancelled(
        &self,
        text: &str,
        source: &str,
        target: &str,
        observer: Option<&dyn DownloadObserver>,
        cancel: &CancellationToken,
    ) -> Result<String, FacadeError> {
        let source: LanguageCode = source.parse()?;
        let target: LanguageCode = target.parse()?;
        self.translate_codes_until_cancelled(text, source, target, observer, cancel)
            .await
    }

    pub async fn translate_codes_until_cancelled(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
        observer: Option<&dyn DownloadObserver>,
        cancel: &CancellationToken,
    ) -> Result<String, FacadeError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(%source, %target, "translation cancelled");
                Err(FacadeError::Cancelled)
            }
            result = self.translate_codes(text, source, target, observer) => result,
        }
    }

    /// Download the model for a single code if it is not present yet
    pub async fn ensure_model(&self, code: &str) -> Result<(), FacadeError> {
        let code: LanguageCode = code.parse()?;
        self.ensure_models(&[code], None).await
    }

    /// Warm the cache for `codes` without translating anything
    pub async fn prefetch(
        &self,
        codes: &[LanguageCode],
        observer: Option<&dyn DownloadObserver>,
    ) -> Result<(), FacadeError> {
        self.ensure_models(codes, observer).await
    }

    async fn ensure_models(
        &self,
        codes: &[LanguageCode],
        observer: Option<&dyn DownloadObserver>,
    ) -> Result<(), FacadeError> {
        let need = self.cache.missing(codes);
        if need.is_empty() {
            tracing::debug!(?codes, "models already present");
            return Ok(());
        }

        let _signal = DownloadSignal::start(observer);
        tracing::info!(?need, "downloading models");

        // all downloads settle before the first failure is reported
        let results = join_all(need.iter().map(|&code| self.download(code))).await;
        results.into_iter().collect()
    }

    async fn download(&self, code: LanguageCode) -> Result<(), FacadeError> {
        let models = &self.models;
        let language = code.provider_language();

        self.cache
            .ensure(code, || async move {
                tracing::debug!(%code, %language, "model download started");
                models.download_model(language).await
            })
            .await
            .map_err(|source| {
                tracing::warn!(%code, "model download failed: {source}");
                FacadeError::ModelDownloadFailed { code, source }
            })?;

        tracing::info!(%code, "model ready");
        Ok(())
    }
}
