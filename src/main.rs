use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{Level, info, warn};

use moveco::config::AppConfig;
use moveco::database;
use moveco::email::EmailService;
use moveco::extractors::AdminRateLimiter;
use moveco::state::AppState;
use moveco::storage::{DatabaseStorage, MemoryStorage, Storage, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let storage: Arc<dyn Storage> = match config.database.url.as_deref() {
        Some(url) => {
            let db = database::init_db(url).await?;
            seed::seed_defaults(&db).await?;
            info!("storage backend: database");
            Arc::new(DatabaseStorage::new(db))
        }
        None => {
            warn!("no database URL configured, falling back to in-memory storage");
            Arc::new(MemoryStorage::new())
        }
    };

    let email = Arc::new(EmailService::new(Arc::clone(&storage)));
    if let Err(err) = email.initialize().await {
        warn!(%err, "email service initialization failed, sending disabled");
    }

    if config.admin.key.is_none() {
        warn!("no administrator key configured, admin endpoints will refuse requests");
    }
    let admin_limiter = Arc::new(AdminRateLimiter::new(
        config.rate_limit.window_secs,
        config.rate_limit.max_requests,
    ));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState {
        storage,
        email,
        admin_limiter,
        config,
    };
    let app = moveco::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
