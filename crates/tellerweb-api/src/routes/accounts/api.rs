//! Accounts API endpoints

use crate::{ApiResult, AppState};
use axum::extract::State;
use axum::Json;
use tellerweb_core::AccountSummary;

/// Total balance, active/closed split and account types still available
pub async fn api_accounts_summary(State(state): State<AppState>) -> ApiResult<Json<AccountSummary>> {
    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    Ok(Json(AccountSummary::from_accounts(&snapshot.accounts)))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_accounts_summary() {
        let response = get(loaded_state().await, "/api/accounts/summary").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["totalBalance"], "1800.5");
        assert_eq!(json["activeAccounts"].as_array().unwrap().len(), 2);
        assert_eq!(json["closedAccounts"].as_array().unwrap().len(), 1);
        assert_eq!(json["availableAccountTypes"], serde_json::json!(["INVESTMENT"]));
    }
}
