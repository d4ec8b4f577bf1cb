use std::sync::Arc;

use auth::TokenIssuer;
use sqlx::postgres::PgPoolOptions;
use sso_service::config::Config;
use sso_service::config::StorageBackend;
use sso_service::domain::auth::models::App;
use sso_service::domain::auth::ports::AuthServicePort;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::http::router::create_router;
use sso_service::outbound::observers::TracingObserver;
use sso_service::outbound::repositories::InMemoryAppStore;
use sso_service::outbound::repositories::InMemoryUserStore;
use sso_service::outbound::repositories::PostgresAppStore;
use sso_service::outbound::repositories::PostgresUserStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sso_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        token_ttl_seconds = config.token.ttl_seconds,
        apps = config.apps.len(),
        "Configuration loaded"
    );

    let token_issuer = TokenIssuer::new(config.token.algorithm)?;
    tracing::info!(token_algorithm = ?token_issuer.algorithm(), "Token issuer ready");
    let observer = Arc::new(TracingObserver::new());

    let auth_service: Arc<dyn AuthServicePort> = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let app_store = PostgresAppStore::new(pg_pool.clone());
            for app in &config.apps {
                app_store.upsert(&App::from(app)).await?;
                tracing::info!(app_id = app.id, app_name = %app.name, "Application registered");
            }

            Arc::new(AuthService::new(
                Arc::new(PostgresUserStore::new(pg_pool)),
                Arc::new(app_store),
                observer,
                token_issuer,
                config.token_ttl(),
            ))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, users are lost on restart");

            let app_store = InMemoryAppStore::new();
            for app in &config.apps {
                app_store.upsert(App::from(app)).await;
                tracing::info!(app_id = app.id, app_name = %app.name, "Application registered");
            }

            Arc::new(AuthService::new(
                Arc::new(InMemoryUserStore::new()),
                Arc::new(app_store),
                observer,
                token_issuer,
                config.token_ttl(),
            ))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, config.request_timeout());
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
