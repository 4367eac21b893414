//! Dashboard API endpoints

use crate::{now, ApiResult, AppState};
use axum::extract::State;
use axum::Json;
use tellerweb_core::{dashboard_summary, transaction_analytics, AnalyticsWindow, DashboardSummary, TransactionAnalytics};

pub async fn api_dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardSummary>> {
    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    Ok(Json(dashboard_summary(snapshot, state.config.dashboard.recent_transactions)))
}

/// Monthly totals, type distribution and daily cash flow ending now
pub async fn api_dashboard_analytics(State(state): State<AppState>) -> ApiResult<Json<TransactionAnalytics>> {
    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    let window = AnalyticsWindow::from(&state.config.dashboard);
    Ok(Json(transaction_analytics(&snapshot.transactions, now(), window)))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_dashboard() {
        let response = get(loaded_state().await, "/api/dashboard").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["totalAccounts"], 3);
        assert_eq!(json["totalTransactions"], 3);
        assert_eq!(json["recentTransactions"][0]["transactionReference"], "TXN003");
    }

    #[tokio::test]
    async fn test_analytics_shape() {
        let response = get(loaded_state().await, "/api/dashboard/analytics").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["monthlyData"]["labels"].as_array().unwrap().len(), 6);
        assert_eq!(json["dailyCashFlow"]["netFlow"].as_array().unwrap().len(), 30);
        assert_eq!(json["typeDistribution"]["deposits"], 1);
        assert_eq!(json["typeDistribution"]["transfersIn"], 1);
    }
}
