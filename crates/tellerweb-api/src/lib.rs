//! HTTP API over the banking client's derived logic
//!
//! Routes are organized into modules:
//! - routes::accounts: Balance aggregation
//! - routes::dashboard: Overview and analytics
//! - routes::cards: Card eligibility, withdrawal cards, lifecycle actions
//! - routes::transactions: Filtering and statement exports
//! - routes::beneficiaries: Saved transfer destinations
//! - routes::validate: Form validation

pub mod error;
pub mod routes;

use axum::{
    extract::State,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::sync::Arc;
use tellerweb_config::Config;
use tellerweb_core::Session;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            config,
        }
    }
}

/// Wall-clock time; derived logic receives it as an argument
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) fn today() -> NaiveDate {
    now().date()
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::api_accounts_summary;
    use routes::beneficiaries::api_beneficiaries;
    use routes::cards::{api_card_actions, api_card_eligibility, api_withdrawal_cards};
    use routes::dashboard::{api_dashboard, api_dashboard_analytics};
    use routes::transactions::{api_export_csv, api_statement, api_transactions};
    use routes::validate::api_validate;

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/accounts/summary", get(api_accounts_summary))
        .route("/api/dashboard", get(api_dashboard))
        .route("/api/dashboard/analytics", get(api_dashboard_analytics))
        .route("/api/cards/eligibility", get(api_card_eligibility))
        .route("/api/cards/:id/actions", get(api_card_actions))
        .route("/api/withdrawals/cards", get(api_withdrawal_cards))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/export.csv", get(api_export_csv))
        .route("/api/transactions/statement", get(api_statement))
        .route("/api/beneficiaries", get(api_beneficiaries))
        .route("/api/validate/:form", post(api_validate))
        .route("/api/reload", post(api_reload))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
struct ReloadResponse {
    success: bool,
    message: String,
}

/// Re-read the snapshot source
async fn api_reload(State(state): State<AppState>) -> ApiResult<Json<ReloadResponse>> {
    let mut session = state.session.write().await;
    session.reload().await?;
    log::info!(target: "tellerweb::api", "Snapshot reloaded");
    Ok(Json(ReloadResponse {
        success: true,
        message: "Snapshot reloaded".to_string(),
    }))
}

/// Bind and serve until the server stops
pub async fn start_server(config: Config, session: Session) -> std::io::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config, session);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!(target: "tellerweb::api", "Starting tellerweb server on http://{}", addr);
    log::info!(target: "tellerweb::api", "Available routes:");
    log::info!(target: "tellerweb::api", "  - /api/accounts/summary, /api/dashboard");
    log::info!(target: "tellerweb::api", "  - /api/cards/*, /api/withdrawals/cards");
    log::info!(target: "tellerweb::api", "  - /api/transactions (export.csv, statement)");

    axum::serve(listener, router).await?;
    log::info!(target: "tellerweb::api", "Server stopped gracefully");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let response = get(empty_state(), "/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn test_not_loaded_is_503() {
        let response = get(empty_state(), "/api/accounts/summary").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["code"], "NOT_LOADED");
    }

    #[tokio::test]
    async fn test_reload() {
        let response = post_json(loaded_state().await, "/api/reload", serde_json::json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);
    }
}
