use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tokio::task::JoinSet;
use tolk_config::Config;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod types;


use self::controller::AppController;
use self::state::AppState;

/// Translate stdin lines with on-device models
#[derive(Parser, Debug)]
#[command(name = "tolk", version)]
struct Args {
    /// JSON profile to load instead of built-in defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Default source language code
    #[arg(short, long)]
    source: Option<String>,
    /// Default target language code
    #[arg(short, long)]
    target: Option<String>,
    /// Provider backend (`mock` or `http`)
    #[arg(short, long)]
    provider: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    if let Some(source) = args.source {
        config.languages.source = source;
    }
    if let Some(target) = args.target {
        config.languages.target = target;
    }
    if let Some(provider) = args.provider {
        config.translator.provider = provider;
    }

    init_tracing(&config);

    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Shutdown requested");
        }
        _ = drain(&mut tasks) => return Ok(()),
    }

    controller.shutdown();
    drain(&mut tasks).await;

    Ok(())
}

async fn drain(tasks: &mut JoinSet<anyhow::Result<()>>) {
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task failed: {e}"),
            Err(e) => tracing::error!("task panicked: {e}"),
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
