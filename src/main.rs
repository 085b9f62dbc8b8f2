use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use eventease_core::{CoreConfig, EventService};

/// Main entry point for the EventEase application
///
/// Loads `.env`, resolves the core configuration once, loads the event catalogue and serves the
/// REST API with graceful shutdown on Ctrl-C.
///
/// # Environment Variables
/// - `EVENTEASE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `EVENTEASE_EVENTS_FILE`: Event catalogue file (default: "data/events.json")
/// - `EVENTEASE_SUGGEST_LIMIT`: Default suggestion limit (default: 5)
/// - `EVENTEASE_SEARCH_FIELDS`: Comma-separated searchable fields (default: all)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, catalogue loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("eventease=info".parse()?)
                .add_directive("eventease_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("EVENTEASE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var("EVENTEASE_EVENTS_FILE").ok(),
        std::env::var("EVENTEASE_SUGGEST_LIMIT").ok(),
        std::env::var("EVENTEASE_SEARCH_FIELDS").ok(),
    )?);
    tracing::info!(
        "++ Catalogue {} (suggest limit {}, fields {})",
        cfg.events_file().display(),
        cfg.suggest_limit(),
        cfg.search_fields()
    );

    let event_service = EventService::load(cfg)?;

    tracing::info!("++ Starting EventEase REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(AppState::new(event_service)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("++ EventEase stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
