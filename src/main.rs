//! PixFlow - Event photo expiry countdowns
//!
//! This is the main entry point for the pixflow server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pixflow::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pixflow={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pixflow server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, expiry={}d, tick={}ms",
          config.host, config.port, config.expiry_days, config.tick_ms);

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.expiry_days,
        config.tick(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /events              - List events");
    info!("  GET    /events/:slug        - Event details and gallery");
    info!("  POST   /views/home          - Open landing page countdown");
    info!("  POST   /views/events/:slug  - Open event expiry countdown");
    info!("  GET    /views/:id           - Current countdown of a view");
    info!("  DELETE /views/:id           - Close a view");
    info!("  POST   /contact             - Submit contact form");
    info!("  GET    /status              - Service status and live timers");
    info!("  GET    /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Stop every countdown still owned by an open view
    let closed = state.close_all_views().await?;
    info!("Server shutdown complete ({} views closed, {} timers left)", closed, state.timers.active());
    Ok(())
}
