use app_state::constants;
use color_eyre::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

/// Build the connection pool and bring the schema up to date.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let db = &constants().database;
    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .min_connections(db.min_connections)
        .max_lifetime(Duration::from_secs(db.max_lifetime))
        .idle_timeout(Duration::from_secs(db.idle_timeout))
        .acquire_timeout(Duration::from_secs(db.acquire_timeout))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database connected, migrations are up to date.");

    Ok(pool)
}
