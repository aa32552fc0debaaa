use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use attachment_reclaim::{api::create_router, ApplicationBuilder, Config};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Structured JSON output for log shippers, human-readable otherwise
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting attachment reclaim service");

    // Load configuration
    let config = Config::from_env();
    config.validate()?;
    info!("Configuration loaded and validated");

    if config.disable_auth {
        tracing::warn!("DISABLE_AUTH=true: admin routes are unauthenticated");
    } else if config.admin_api_keys.is_empty() {
        tracing::warn!("ADMIN_API_KEYS is empty: every /v1 request will be rejected");
    }

    let listen_addr = config.listen_addr.clone();

    let state = ApplicationBuilder::new(config)
        .with_database()
        .await?
        .with_attachment_directory()
        .build()?;
    info!("Application layer initialized");

    // Create router
    let app = create_router(state);

    // Start server
    info!("Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
