//! HTTP surface: the Shopify `orders/create` webhook and a liveness route.
//!
//! The webhook always answers `200`. Shopify retries anything else, and the
//! pipeline has no dedup guard, so internal failures only show up in logs:
//! - `ok` when the order went through the pipeline (flagged or not)
//! - `error` when the body was unreadable or over the size limit, the payload
//!   was malformed, or processing panicked

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::app::state::AppState;
use crate::domain::model::OrderEvent;
use crate::utils::error::Result;

pub const WEBHOOK_PATH: &str = "/webhooks/orders/create";
pub const HEALTH_BODY: &str = "Nekorekten Shopify checker is running";
/// Shopify order payloads stay well below this, even with many line items.
pub const MAX_WEBHOOK_BYTES: usize = 4 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route(WEBHOOK_PATH, post(order_created))
        .layer(DefaultBodyLimit::max(MAX_WEBHOOK_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    HEALTH_BODY
}

/// Takes the body rejection and parses the payload itself so a bad body never
/// becomes a framework 4xx.
async fn order_created(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> (StatusCode, &'static str) {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!("❌ Could not read orders/create body: {}", rejection.body_text());
            return (StatusCode::OK, "error");
        }
    };

    let order = match OrderEvent::from_slice(&body) {
        Ok(order) => order,
        Err(e) => {
            error!("❌ Malformed orders/create payload ({} bytes): {}", body.len(), e);
            return (StatusCode::OK, "error");
        }
    };

    info!("➡️ Received order webhook: {}", order.display_id());

    // Own task so a panic surfaces as a JoinError instead of tearing down the connection.
    let checker = state.checker.clone();
    let order_id = order.display_id();
    match tokio::spawn(async move { checker.check(&order).await }).await {
        Ok(outcome) => {
            info!("Order {} processed: {:?}", order_id, outcome);
            (StatusCode::OK, "ok")
        }
        Err(e) => {
            error!("❌ orders/create webhook failed for order {}: {}", order_id, e);
            (StatusCode::OK, "error")
        }
    }
}

/// Serves until Ctrl+C or SIGTERM, then drains in-flight webhooks.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| error!("❌ Could not bind {}: {}", addr, e))?;
    info!("App listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
