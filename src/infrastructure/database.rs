use crate::config::AppConfig;
use crate::infrastructure::retry::{RetryError, RetryPolicy};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

/// Opens the connection pool, retrying per the configured policy.
pub async fn init_pool(config: &AppConfig) -> Result<PgPool, RetryError<sqlx::Error>> {
    let policy = RetryPolicy::new(config.db_connect_max_retries(), config.db_connect_timeout());
    let url = config.database_url();
    let max_connections = config.db_max_connections();
    let acquire_timeout = config.db_connect_timeout();

    let pool = policy
        .run("database connection", || {
            PgPoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(acquire_timeout)
                .connect(url)
        })
        .await?;
    info!(max_connections, "database pool ready");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
