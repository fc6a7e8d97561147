use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::OnceCell;

use crate::language::LanguageCode;

/// Memo of which language models are on the device.
///
/// Entries are never removed. A code counts as present once its download
/// succeeded; while a download is running, other callers asking for the same
/// code join it instead of starting their own. A failed download leaves the
/// entry empty so the next caller tries again.
#[derive(Debug, Default)]
pub struct ModelCache {
    entries: Mutex<HashMap<LanguageCode, Arc<OnceCell<()>>>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: LanguageCode) -> bool {
        self.entries()
            .get(&code)
            .is_some_and(|cell| cell.initialized())
    }

    /// Present codes, sorted
    pub fn snapshot(&self) -> Vec<LanguageCode> {
        let mut present: Vec<_> = self
            .entries()
            .iter()
            .filter(|(_, cell)| cell.initialized())
            .map(|(code, _)| *code)
            .collect();
        present.sort();
        present
    }

    /// Codes from `codes` not yet present, duplicates collapsed, order kept
    pub fn missing(&self, codes: &[LanguageCode]) -> Vec<LanguageCode> {
        let entries = self.entries();
        let mut need = Vec::with_capacity(codes.len());
        for &code in codes {
            let present = entries.get(&code).is_some_and(|cell| cell.initialized());
            if !present && !need.contains(&code) {
                need.push(code);
            }
        }
        need
    }

    /// Run `download` for `code` unless it is present or already running.
    ///
    /// The code is recorded the moment `download` succeeds.
    pub async fn ensure<F, Fut, E>(&self, code: LanguageCode, download: F) -> Result<(), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let cell = Arc::clone(self.entries().entry(code).or_default());
        cell.get_or_try_init(download).await?;
        Ok(())
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<LanguageCode, Arc<OnceCell<()>>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
