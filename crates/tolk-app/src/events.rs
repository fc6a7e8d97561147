use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tolk_core::{DownloadObserver, TranslationRequest};
use uuid::Uuid;

use crate::state::AppState;
use crate::types::AppEvent;

/// Forwards download state of one request to the output channel
///
/// The sender must be unbounded; a full channel would lose the closing `false`.
pub(crate) struct ChannelObserver {
    pub(crate) id: Uuid,
    pub(crate) tx: AsyncSender<AppEvent>,
}

impl DownloadObserver for ChannelObserver {
    fn on_download_state(&self, downloading: bool) {
        let event = AppEvent::DownloadState {
            id: self.id,
            downloading,
        };
        match self.tx.try_send(event) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("output channel full, dropping download state for {}", self.id),
            Err(e) => tracing::warn!("dropping download state for {}: {e}", self.id),
        }
    }
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut translations = JoinSet::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = input_rx.recv() => match event {
                Ok(event) => event,
                // input side closed, nothing more to do
                Err(_) => break,
            },
        };

        tracing::debug!("[EVENT_LOOP] event: {:?}", std::mem::discriminant(&event));
        handle_event(state.clone(), &mut translations, &output_tx, &cancel, event).await?;

        // reap finished translations so the set stays small
        while translations.try_join_next().is_some() {}
    }

    tracing::info!(
        "[EVENT_LOOP] Input closed, waiting for {} translations",
        translations.len()
    );
    while translations.join_next().await.is_some() {}

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

async fn handle_event(
    state: Arc<AppState>,
    translations: &mut JoinSet<()>,
    output_tx: &AsyncSender<AppEvent>,
    cancel: &CancellationToken,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::TranslateRequest { id, request } => {
            // each request runs on its own so slow downloads don't block input
            translations.spawn(handle_translation(
                state,
                id,
                request,
                output_tx.clone(),
                cancel.child_token(),
            ));
        }
        AppEvent::ListModels => {
            output_tx
                .send(AppEvent::ShowModels(state.facade.downloaded()))
                .await?;
        }
        AppEvent::InvalidInput { .. } => {
            output_tx.send(event).await?;
        }
        AppEvent::DownloadState { .. }
        | AppEvent::ShowModels(_)
        | AppEvent::ShowTranslation { .. }
        | AppEvent::TranslationFailed { .. } => {
            // output-only events
        }
    }

    Ok(())
}

pub async fn handle_translation(
    state: Arc<AppState>,
    id: Uuid,
    request: TranslationRequest,
    output_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) {
    tracing::info!(%id, source = %request.source, target = %request.target, "translation requested");

    let observer = ChannelObserver {
        id,
        tx: output_tx.clone(),
    };
    let result = state
        .facade
        .translate_codes_until_cancelled(
            &request.text,
            request.source,
            request.target,
            Some(&observer),
            &cancel,
        )
        .await;

    let event = match result {
        Ok(text) => AppEvent::ShowTranslation {
            id,
            text,
            from_lang: request.source,
            to_lang: request.target,
        },
        Err(e) => {
            tracing::warn!(%id, "translation failed: {e}");
            AppEvent::TranslationFailed {
                id,
                error: e.to_string(),
            }
        }
    };

    if let Err(e) = output_tx.send(event).await {
        tracing::error!(%id, "output channel closed: {e}");
    }
}
