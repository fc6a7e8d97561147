use std::io::Write;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tolk_core::{FacadeError, LanguageCode, TranslationRequest, supported_languages};
use uuid::Uuid;

use crate::types::AppEvent;

/// What a line of input asks for
#[derive(Debug, PartialEq)]
pub enum Command {
    Translate(TranslationRequest),
    ListModels,
    Empty,
}

/// Parse one input line.
///
/// `en>de Hello` picks the pair explicitly, `:models` lists downloaded models,
/// anything else is translated with `defaults`. A first word only counts as a
/// pair when both sides are two or three letters, so `1>0 is true` is text.
pub fn parse_line(line: &str, defaults: (LanguageCode, LanguageCode)) -> Result<Command, FacadeError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    if line == ":models" {
        return Ok(Command::ListModels);
    }

    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    if let Some((source, target)) = head
        .split_once('>')
        .filter(|(source, target)| looks_like_code(source) && looks_like_code(target))
    {
        return TranslationRequest::new(rest.trim_start(), source, target).map(Command::Translate);
    }

    let (source, target) = defaults;
    Ok(Command::Translate(TranslationRequest {
        text: line.to_string(),
        source,
        target,
    }))
}

fn looks_like_code(s: &str) -> bool {
    (2..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// Reads stdin line by line and forwards commands to the event loop
pub async fn input_io(
    defaults: (LanguageCode, LanguageCode),
    input_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if interactive {
            print!("> ");
            std::io::stdout().flush()?;
        }

        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            tracing::info!("stdin closed");
            break;
        };

        let event = match parse_line(&line, defaults) {
            Ok(Command::Empty) => continue,
            Ok(Command::ListModels) => AppEvent::ListModels,
            Ok(Command::Translate(request)) => AppEvent::TranslateRequest {
                id: Uuid::new_v4(),
                request,
            },
            Err(e) => AppEvent::InvalidInput {
                line,
                reason: format!("{e} (supported: {})", supported_list()),
            },
        };
        input_tx.send(event).await?;
    }

    Ok(())
}

/// Renders output events; returns once every sender is gone
pub async fn output_io(output_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    while let Ok(event) = output_rx.recv().await {
        if let Some(line) = render(&event) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn render(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::DownloadState { id, downloading } => Some(if *downloading {
            format!("[{}] downloading language models...", short_id(id))
        } else {
            format!("[{}] downloads settled", short_id(id))
        }),
        AppEvent::ShowTranslation {
            id,
            text,
            from_lang,
            to_lang,
        } => Some(format!("[{}] {from_lang}>{to_lang}: {text}", short_id(id))),
        AppEvent::TranslationFailed { id, error } => {
            Some(format!("[{}] error: {error}", short_id(id)))
        }
        AppEvent::ShowModels(models) if models.is_empty() => {
            Some("no models downloaded yet".to_string())
        }
        AppEvent::ShowModels(models) => Some(format!(
            "downloaded: {}",
            models
                .iter()
                .map(|code| code.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )),
        AppEvent::InvalidInput { line, reason } => Some(format!("cannot handle '{line}': {reason}")),
        AppEvent::TranslateRequest { .. } | AppEvent::ListModels => None,
    }
}

fn supported_list() -> String {
    supported_languages()
        .iter()
        .map(|code| code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}
