mod facade_tests;

use std::sync::{Arc, Mutex};

use tolk_translator::MockProvider;

use crate::facade::TranslationFacade;
use crate::progress::DownloadObserver;

/// Collects every download state change it sees
#[derive(Default)]
pub(crate) struct Recorder {
    states: Mutex<Vec<bool>>,
}

impl Recorder {
    pub(crate) fn states(&self) -> Vec<bool> {
        self.states.lock().unwrap().clone()
    }
}

impl DownloadObserver for Recorder {
    fn on_download_state(&self, downloading: bool) {
        self.states.lock().unwrap().push(downloading);
    }
}

pub(crate) fn facade(provider: MockProvider) -> (TranslationFacade, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    (TranslationFacade::from_provider(provider.clone()), provider)
}
