use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lexis_io::SelectionFeed;
use lexis_knowledge::{InMemoryStore, KnowledgeStore, StoreConnectClient};
use lexis_lexicon::{FreeDictionaryClient, Lexicon};
use tokio::signal;

use crate::controller::AppController;
use crate::io::SourceKind;
use crate::state::AppState;

mod controller;
mod events;
mod io;
mod logging;
mod profile;
mod state;
mod ui;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum StoreKind {
    /// Local store snapshotted to `--store-file`
    Memory,
    /// Store bridge at `knowledge.store_url`
    Remote,
}

/// Looks up the word you select and saves its definitions as knowledge nodes
#[derive(Debug, Parser)]
#[command(name = "lexis", version)]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the default config to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Selection source, defaults to the websocket when `listen_to_ws` is set
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    #[arg(long, value_enum, default_value_t = StoreKind::Memory)]
    store: StoreKind,

    #[arg(long, default_value = "lexis-knowledge.json")]
    store_file: PathBuf,

    /// Root node new words are saved under
    #[arg(long)]
    root: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    logging::init_tracing(args.log_level.as_deref(), args.log_json)?;

    if let Some(path) = &args.write_config {
        return profile::write_default_config(path);
    }

    let mut config = profile::load_config(args.config.as_deref())?;
    if let Some(root) = &args.root {
        config.knowledge.root_node_name = root.trim().to_string();
    }

    let source = args.source.unwrap_or(if config.listen_to_ws {
        SourceKind::Ws
    } else {
        SourceKind::Clipboard
    });

    let lexicon: Arc<dyn Lexicon> =
        Arc::new(FreeDictionaryClient::new(config.dictionary.api_url.clone()));

    let mut snapshot = None;
    let store: Arc<dyn KnowledgeStore> = match args.store {
        StoreKind::Memory => {
            let memory = Arc::new(InMemoryStore::load(&args.store_file).await?);
            if config.knowledge.root_configured() {
                memory.ensure_root(&config.knowledge.root_node_name).await;
            }
            snapshot = Some(memory.clone());
            memory
        }
        StoreKind::Remote => {
            let client = StoreConnectClient::new(config.knowledge.store_url.clone());
            match client.check_connection().await {
                Ok(version) => tracing::info!("Connected to knowledge store (v{})", version),
                Err(e) => tracing::warn!(
                    "Knowledge store at {} is not reachable yet: {}",
                    config.knowledge.store_url,
                    e
                ),
            }
            Arc::new(client)
        }
    };

    if !config.knowledge.root_configured() {
        tracing::warn!("No dictionary root configured, use --root or :root <name> before saving");
    }

    let state = Arc::new(AppState::new(config, lexicon, store));
    let controller = AppController::new(state, SelectionFeed::new());
    let mut tasks = controller.spawn_tasks(source).await;

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {}", e);
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    if let Some(memory) = snapshot {
        memory.save(&args.store_file).await?;
    }

    Ok(())
}
