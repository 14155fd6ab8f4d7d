//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use rawat_core::config::GatewayConfig;
use rawat_dispatch::Dispatcher;

use crate::store::SqliteStore;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    /// The resolve → plan → send pipeline shared with the daily trigger.
    pub dispatcher: Arc<Dispatcher>,
    /// Group config + message log storage.
    pub store: Arc<SqliteStore>,
    /// Outbound WhatsApp client, for the group-listing passthrough.
    pub gateway: Arc<dyn rawat_core::traits::MessageGateway>,
    /// Timezone defining "today" for date-less requests.
    pub tz: chrono_tz::Tz,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);

    Router::new()
        .route("/health", get(super::routes::health_check))
        .route(
            "/api/v1/assignments/today",
            get(super::routes::get_today_assignments),
        )
        .route(
            "/api/v1/assignments/{date}",
            get(super::routes::get_assignments_by_date),
        )
        .route("/api/v1/pm/send", post(super::routes::send_today_schedule))
        .route(
            "/api/v1/pm/send-by-date",
            post(super::routes::send_schedule_by_date),
        )
        .route(
            "/api/v1/whatsapp-config",
            get(super::routes::get_whatsapp_config)
                .post(super::routes::upsert_whatsapp_config)
                .delete(super::routes::delete_whatsapp_config),
        )
        .route(
            "/api/v1/whatsapp-config/groups",
            get(super::routes::list_whatsapp_groups),
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: &GatewayConfig, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gateway server listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
