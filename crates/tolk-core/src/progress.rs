use tokio::sync::watch;

/// Receives download state changes for one facade call.
///
/// Every `true` is followed by exactly one `false` for the same call, also when
/// a download fails or the call is dropped.
pub trait DownloadObserver: Send + Sync {
    fn on_download_state(&self, downloading: bool);
}

impl<F> DownloadObserver for F
where
    F: Fn(bool) + Send + Sync,
{
    fn on_download_state(&self, downloading: bool) {
        self(downloading)
    }
}

/// Publishes the state as a boolean stream
impl DownloadObserver for watch::Sender<bool> {
    fn on_download_state(&self, downloading: bool) {
        self.send_replace(downloading);
    }
}

/// Signals `true` on creation and `false` on drop
pub(crate) struct DownloadSignal<'a> {
    observer: Option<&'a dyn DownloadObserver>,
}

impl<'a> DownloadSignal<'a> {
    pub(crate) fn start(observer: Option<&'a dyn DownloadObserver>) -> Self {
        if let Some(observer) = observer {
            observer.on_download_state(true);
        }
        Self { observer }
    }
}

impl Drop for DownloadSignal<'_> {
    fn drop(&mut self) {
        if let Some(observer) = self.observer {
            observer.on_download_state(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn signal_is_balanced() {
        let seen = Mutex::new(Vec::new());
        let observer = |downloading: bool| seen.lock().unwrap().push(downloading);

        {
            let _signal = DownloadSignal::start(Some(&observer));
            assert_eq!(*seen.lock().unwrap(), vec![true]);
        }

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn watch_sender_tracks_latest_state() {
        let (tx, rx) = watch::channel(false);

        let signal = DownloadSignal::start(Some(&tx));
        assert!(*rx.borrow());
        drop(signal);
        assert!(!*rx.borrow());
    }
}
