use anyhow::Result;
use nutrition_insights::cli::parse_args;
use nutrition_insights::server::NutritionApiServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env before clap reads env fallbacks

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = parse_args().into_config();
    NutritionApiServer::new(config).start().await
}
