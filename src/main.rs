use momentum_backend::{api, config::Config, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env()?;

    tracing::info!("Starting Momentum Biz server");
    tracing::info!("Environment: {}", config.server.environment);
    tracing::info!("PayPal mode: {}", config.paypal.mode);
    tracing::info!("Payments directory: {}", config.storage.payments_dir.display());
    if config.webhook.url.is_none() {
        tracing::warn!("WEBHOOK_URL not set, completed payments will not be forwarded");
    }

    let host = config.server.host.clone();
    let port = config.server.port;
    let app = api::router(AppState::from_config(config)?);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// JSON logs in production, human-readable elsewhere; `RUST_LOG` overrides the level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let production = std::env::var("ENVIRONMENT")
        .map(|env| env == "production")
        .unwrap_or(false);

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if production {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
