//! In-memory provider that records every call.
//!
//! Backs the test suites and the offline `mock` provider mode of the app.
//! Unless a canned translation matches, `translate` answers with
//! `"[<target tag>] <text>"`.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::{ModelProvider, ProviderError, ProviderLanguage, ProviderMetadata, Translator};

/// One recorded `translate` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateCall {
    pub text: String,
    pub source: ProviderLanguage,
    pub target: ProviderLanguage,
}

#[derive(Debug, Default)]
pub struct MockProvider {
    failing_downloads: HashSet<ProviderLanguage>,
    fail_translate: bool,
    download_delay: Option<Duration>,
    canned: HashMap<(String, ProviderLanguage, ProviderLanguage), String>,
    downloads: Mutex<Vec<ProviderLanguage>>,
    translations: Mutex<Vec<TranslateCall>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every download of `language` fail
    pub fn fail_download(mut self, language: ProviderLanguage) -> Self {
        self.failing_downloads.insert(language);
        self
    }

    /// Make every `translate` call fail
    pub fn fail_translate(mut self) -> Self {
        self.fail_translate = true;
        self
    }

    /// Hold each download for `delay` before it settles
    pub fn with_download_delay(mut self, delay: Duration) -> Self {
        self.download_delay = Some(delay);
        self
    }

    /// Answer `text` from `source` to `target` with `output`
    pub fn with_translation(
        mut self,
        text: &str,
        source: ProviderLanguage,
        target: ProviderLanguage,
        output: &str,
    ) -> Self {
        self.canned
            .insert((text.to_string(), source, target), output.to_string());
        self
    }

    /// Downloads issued so far, in issue order
    pub fn downloads(&self) -> Vec<ProviderLanguage> {
        lock(&self.downloads).clone()
    }

    pub fn download_count(&self, language: ProviderLanguage) -> usize {
        lock(&self.downloads)
            .iter()
            .filter(|l| **l == language)
            .count()
    }

    /// Most downloads that were running at the same moment
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn translations(&self) -> Vec<TranslateCall> {
        lock(&self.translations).clone()
    }

    /// Total number of provider calls of either kind
    pub fn call_count(&self) -> usize {
        lock(&self.downloads).len() + lock(&self.translations).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ModelProvider for MockProvider {
    async fn download_model(&self, language: ProviderLanguage) -> Result<(), ProviderError> {
        lock(&self.downloads).push(language);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.download_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_downloads.contains(&language) {
            return Err(ProviderError::ModelUnavailable(language));
        }

        Ok(())
    }
}

#[async_trait]
impl Translator for MockProvider {
    async fn translate(
        &self,
        text: &str,
        source: ProviderLanguage,
        target: ProviderLanguage,
    ) -> Result<String, ProviderError> {
        lock(&self.translations).push(TranslateCall {
            text: text.to_string(),
            source,
            target,
        });

        if self.fail_translate {
            return Err(ProviderError::Api("mock translate failure".to_string()));
        }

        let output = self
            .canned
            .get(&(text.to_string(), source, target))
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", target.tag(), text));

        Ok(output)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "mock".to_string(),
            on_device: true,
            requires_api_key: false,
        }
    }
}
