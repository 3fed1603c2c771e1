use api::serve;
use app_state::load_app_settings;
use color_eyre::Result;
use common_services::database::connect;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = load_app_settings()?;

    let level = &settings.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("api={level},common_services={level},tower_http=info").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = connect(&settings.secrets.database_url).await?;
    serve(pool, settings).await?;

    Ok(())
}
