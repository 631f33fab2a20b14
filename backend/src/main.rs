use std::net::SocketAddr;

use restock_portal_backend::{config::Config, create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restock_server=debug,restock_portal_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration, falling back to demo defaults when absent
    dotenvy::dotenv().ok();
    let config = Config::load_or_demo();

    tracing::info!("Starting {}", config.app_name);
    tracing::info!("Environment: {}", config.environment);
    if config.is_demo_mode() {
        tracing::warn!(
            "Running in demo mode with branch \"Demo Branch\" / PIN \"0000\"; \
             supply a configuration file to add real branches"
        );
    }

    let port = config.server.port;
    let state = AppState::new(config);
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
