use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use steeple_app::app::api::routes;
use steeple_app::app::uploads::upload_routes;
use steeple_app::config::{ConfigHandler, DatabaseBackend, Settings};
use steeple_app::context::{AppContext, ContextHandler};
use steeple_core::config::load_config;
use steeple_db::db::connection::create_pool;
use steeple_db::db::migrations::run_migrations;
use steeple_db::storage::fs::FsObjectStore;
use steeple_db::store::DocumentStore;
use steeple_db::store::memory::MemoryDocumentStore;
use steeple_db::store::postgres::PgDocumentStore;
use steeple_service::calendar::SystemClock;

async fn open_store(config: &Settings) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.database.backend {
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory document store; data is lost on shutdown");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        DatabaseBackend::Postgres => {
            let url = config.database.postgres_url()?;
            run_migrations(url).await?;

            let pool = create_pool(url, u32::from(config.database.max_connections)).await?;
            tracing::info!("Database connection pool created");
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Steeple church administration server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store = open_store(&config).await?;
    let objects = Arc::new(FsObjectStore::new(
        &config.storage.root,
        config.storage.public_base_url.clone(),
    ));
    let clock = Arc::new(SystemClock::new(config.calendar.tz()?));
    tracing::info!(
        storage_root = %config.storage.root,
        timezone = %config.calendar.timezone,
        "Object store and clock ready"
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let mut router = Router::new()
        .hoop(ContextHandler {
            context: AppContext::new(store, objects, clock),
        })
        .hoop(ConfigHandler::new(config.clone()))
        .push(routes());

    if let Some(uploads) = upload_routes(&config.storage) {
        router = router.push(uploads);
    }

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
