// src/main.rs
use anyhow::Result;
use ideaflow_core::application::{
    ports::{
        security::{PasswordHasher, TokenManager},
        session_revocation::SessionRevocationStore,
        time::Clock,
    },
    services::{ApplicationServices, Repositories},
};
use ideaflow_core::config::AppConfig;
use ideaflow_core::infrastructure::{
    database,
    repositories::{
        PostgresAuditLogRepository, PostgresIdeaRepository, PostgresNotificationRepository,
        PostgresUserRepository,
    },
    security::{
        password::Argon2PasswordHasher, session_store::InMemorySessionRevocationStore,
        token::BiscuitTokenManager,
    },
    time::SystemClock,
};
use ideaflow_core::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(&config).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("database migrations applied");

    let repos = Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        ideas: Arc::new(PostgresIdeaRepository::new(pool.clone())),
        audit_logs: Arc::new(PostgresAuditLogRepository::new(pool.clone())),
        notifications: Arc::new(PostgresNotificationRepository::new(pool)),
    };

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let session_store: Arc<dyn SessionRevocationStore> =
        Arc::new(InMemorySessionRevocationStore::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        repos,
        password_hasher,
        token_manager,
        session_store,
        clock,
    ));

    let app = build_router(HttpState::new(services), config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
