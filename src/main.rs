use anyhow::Result;
use tracing_subscriber::EnvFilter;

use quillpress::config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (ignored if absent)
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.print_summary();

    quillpress::server::run(config).await
}
