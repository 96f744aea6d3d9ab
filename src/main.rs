//! orbit-router server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use orbit_router::api;
use orbit_router::app_state::AppState;
use orbit_router::config::RouterConfig;
use orbit_router::domain::{EventBus, SystemClock};
use orbit_router::engine::{MintRebateHook, RouterEngine, TreasuryGateway};
use orbit_router::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = RouterConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting orbit-router");
    tracing::info!(
        owner = %config.owner,
        treasury = %config.treasury,
        daily_event_cap = config.daily_event_cap,
        "engine identities"
    );

    // Build engine layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let engine = RouterEngine::new(
        config.owner,
        config.treasury,
        config.rebate_vault,
        config.daily_event_cap,
        event_bus.clone(),
        Arc::new(SystemClock),
    );
    let gateway = TreasuryGateway::new(engine.clone());
    let mint_hook = MintRebateHook::new(engine.clone());

    // Build application state
    let app_state = AppState {
        engine,
        gateway,
        mint_hook,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
