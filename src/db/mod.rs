use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::Config;

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/ (creates `outlet_food`).
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Connect and migrate when a DSN is configured.
///
/// Returns `None` when no DSN is set or when connecting/migrating fails; the
/// service then runs on the snapshot and in-memory tiers only.
pub async fn connect(config: &Config) -> Option<PgPool> {
    let Some(url) = config.database_url.as_deref() else {
        info!("DATABASE_DSN not set, store tier disabled (snapshot and default menu only)");
        return None;
    };

    let pool = match create_pool(url, config.db_max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!("failed to connect database, store tier disabled: {}", e);
            return None;
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        warn!("migrations failed, store tier disabled: {}", e);
        return None;
    }

    info!("Database connected and migrations applied");
    Some(pool)
}
