//! Word-game lookup server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!   Client Request       │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ─────────────────────┼─▶│  http    │──▶│  lookup  │──▶│  words   │  │
//!                        │  │ server + │   │ validate │   │ (cached/ │  │
//!                        │  │ access   │   │ dispatch │   │ per-req) │  │
//!   Client Response      │  │ log      │◀──│ envelope │◀──│          │  │
//!   ◀────────────────────┼──└────┬─────┘   └──────────┘   └──────────┘  │
//!                        │       │ snapshot                             │
//!                        │  ┌────▼─────┐   swap   ┌──────────────────┐  │
//!                        │  │templates │◀─────────│ template watcher │  │
//!                        │  │  store   │          │ (notify + task)  │  │
//!                        │  └──────────┘          └──────────────────┘  │
//!                        │  ┌────────────────────────────────────────┐  │
//!                        │  │ lifecycle: start → serve → drain (5s)  │  │
//!                        │  └────────────────────────────────────────┘  │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use wordgame_web::config::Cli;
use wordgame_web::download;
use wordgame_web::lifecycle::{self, shutdown_signal};
use wordgame_web::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    init_logging(&config.observability);

    tracing::info!("wordgame-web v{} starting", env!("CARGO_PKG_VERSION"));

    if cli.download {
        let fetched = download::fetch_all(&config.download).await?;
        tracing::info!(files = fetched, "Download complete");
        return Ok(());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        template_dir = ?config.templates.dir,
        word_lists = config.words.paths.len(),
        word_mode = ?config.words.mode,
        drain_timeout_secs = config.shutdown.drain_timeout_secs,
        "Configuration loaded"
    );

    let running = lifecycle::start(config).await?;
    tracing::info!(address = %running.local_addr()?, "Listening for connections");

    running.serve(shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
