//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when you want the REST server without the `.env` handling of the
//! workspace's main `eventease-run` binary.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use eventease_core::{CoreConfig, EventService};

/// Main entry point for the EventEase REST API server
///
/// # Environment Variables
/// - `EVENTEASE_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `EVENTEASE_EVENTS_FILE`: Event catalogue file (default: "data/events.json")
/// - `EVENTEASE_SUGGEST_LIMIT`: Default suggestion limit (default: 5)
/// - `EVENTEASE_SEARCH_FIELDS`: Comma-separated searchable fields (default: all)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration or the event catalogue is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("eventease_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("EVENTEASE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var("EVENTEASE_EVENTS_FILE").ok(),
        std::env::var("EVENTEASE_SUGGEST_LIMIT").ok(),
        std::env::var("EVENTEASE_SEARCH_FIELDS").ok(),
    )?);
    let event_service = EventService::load(cfg)?;

    tracing::info!("-- Starting EventEase REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(AppState::new(event_service))).await?;

    Ok(())
}
