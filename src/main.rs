use tracing_subscriber::EnvFilter;

use streamhub_schedule_lib::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("streamhub_schedule=info,streamhub_schedule_lib=info,tower_http=info")),
        )
        .init();

    tracing::info!(data_dir = %config.data_dir.display(), port = config.port, "starting");
    streamhub_schedule_lib::run(config).await?;
    Ok(())
}
