use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::{input_io, output_io};
use crate::state::AppState;
use crate::types::AppEvent;

/// Centralized channel management
pub struct ChannelSet {
    pub input: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub output: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input: kanal::bounded_async(64),
            // unbounded: download state events must never be dropped
            output: kanal::unbounded_async(),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn the app tasks. The set drains on its own once stdin closes and
    /// pending translations are written out.
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        // tasks own every channel end, so closing stdin closes the pipeline
        let ChannelSet { input, output } = ChannelSet::new();
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            input.1,
            output.0,
            self.cancel_token.child_token(),
        ));

        // Stdin reader
        tasks.spawn(input_io(
            self.state.default_pair,
            input.0,
            self.cancel_token.child_token(),
        ));

        // Stdout writer
        tasks.spawn(output_io(output.1));

        // Model prefetch is best effort and must not hold the set open
        tokio::spawn(prefetch(self.state.clone(), self.cancel_token.child_token()));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

pub(crate) async fn prefetch(state: Arc<AppState>, cancel: CancellationToken) {
    let enabled = state.config.read().await.languages.prefetch;
    if !enabled {
        return;
    }

    let (source, target) = state.default_pair;
    let codes = [source, target];
    tokio::select! {
        _ = cancel.cancelled() => {}
        result = state.facade.prefetch(&codes, None) => match result {
            Ok(()) => tracing::info!("Prefetched models for {source}>{target}"),
            // translate retries the download later
            Err(e) => tracing::warn!("Prefetch failed: {e}"),
        },
    }
}
