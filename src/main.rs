use newsroom::{bind_listener, build_app, init_db, run_app, Config, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("newsroom=info,tower_http=info")),
        )
        .init();

    if let Err(error) = start().await {
        tracing::error!("Error: {:#}", error);
        std::process::exit(1);
    }
}

async fn start() -> Result<()> {
    let config = Config::from_env()?;
    let pool = init_db(&config).await?;
    let listener = bind_listener(&config)?;
    run_app(build_app(pool), listener).await
}
