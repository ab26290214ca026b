mod cache;
mod catalyst;
mod cli;
mod error;
mod render;
mod server;
mod source;
mod storage;
#[cfg(test)]
mod testing;

use std::{env, sync::Arc};

use anyhow::Result;
use log::info;
use tokio::{net::TcpListener, signal};

use crate::cache::DocumentCache;
use crate::server::AppState;
use crate::source::Fetcher;
use crate::storage::{FileStore, MemoryStore, RecordStore};

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "catalyst_proxy=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let cache = DocumentCache::new(cache::Config {
        enabled: args.enable_cache,
        ttl: args.cache_ttl,
    });

    let client = reqwest::Client::builder()
        .timeout(args.fetch_timeout)
        .build()?;

    let store: Arc<dyn RecordStore> = match args.data_dir {
        Some(dir) => {
            info!("Keeping records in {}", dir.display());
            Arc::new(FileStore::new(dir)?)
        }
        None => Arc::new(MemoryStore::default()),
    };

    for source in &args.sources {
        info!("Watching {} for a {} date in {}", source.url, source.label, source.expected_year);
    }

    let router = server::router(AppState {
        fetcher: Fetcher::new(client, cache),
        sources: args.sources,
        events: args.events,
        store,
    });

    let listener = TcpListener::bind(args.address).await?;
    info!("Listening at http://{}", args.address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
