use app_state::AppSettings;
use color_eyre::eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use std::net::TcpListener;
use tempfile::TempDir;
use tracing::info;
use url::Url;

/// Derives a settings object for one test run: free port, temporary media
/// folder, and the freshly created test database.
pub fn create_test_settings(
    database_name: &str,
    base_settings: &AppSettings,
) -> Result<(AppSettings, TempDir)> {
    let mut settings = base_settings.clone();

    let media_dir = TempDir::new()?;
    let port = get_free_port()?;
    settings.api.port = u32::from(port);
    settings.api.public_url = format!("http://localhost:{port}");
    settings.uploads.media_folder = media_dir.path().to_path_buf();

    let mut db_url = Url::parse(&settings.secrets.database_url)?;
    db_url.set_path(&format!("/{database_name}"));
    settings.secrets.database_url = db_url.to_string();

    Ok((settings, media_dir))
}

/// Creates the throwaway test database and returns a pool connected to it,
/// plus the management pool used to drop it afterwards.
pub async fn create_test_database(
    base_database_url: &str,
    database_name: &str,
) -> Result<(PgPool, PgPool)> {
    let mut management_db_url = Url::parse(base_database_url)?;
    management_db_url.set_path("/postgres");
    let management_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(management_db_url.as_str())
        .await?;
    force_drop_db(&management_pool, database_name).await;

    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;

    let mut test_db_url = Url::parse(base_database_url)?;
    test_db_url.set_path(&format!("/{database_name}"));
    // connect() also runs the embedded migrations.
    let main_pool = common_services::database::connect(test_db_url.as_str()).await?;
    info!("Finished database migrations for {}", database_name);

    Ok((main_pool, management_pool))
}

pub async fn force_drop_db(management_pool: &PgPool, db_name: &str) {
    let _ = management_pool
        .execute(format!("DROP DATABASE \"{db_name}\" WITH (FORCE)").as_str())
        .await;
}

fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
