//! SurveyCast Web Server
//!
//! Run with: cargo run -p surveycast-web

use surveycast_common::Domain;
use surveycast_web::config::Config;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up endpoint URLs from a local .env when present
    dotenvy::dotenv().ok();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting SurveyCast web server...");

    let config = Config::load()?;
    for domain in Domain::ALL {
        match config.endpoint(domain) {
            Some(url) => info!(%domain, %url, "prediction endpoint configured"),
            None => warn!(%domain, "no prediction endpoint configured; submissions will fail"),
        }
    }
    let addr = config.bind_addr()?;

    // Create app state
    let state = surveycast_web::state::AppState::from_config(config)?;

    // Build router
    let app = surveycast_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
