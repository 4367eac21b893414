//! Transactions API endpoints

use super::parse_filter;
use crate::{ApiResult, AppState};
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use tellerweb_core::{filter_transactions, Transaction, TransactionQuery};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    pub filtered_count: usize,
}

/// Transactions matching `search`, `type` and `account`, in snapshot order
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Json<TransactionsResponse>> {
    let filter = parse_filter(query)?;
    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    let transactions = filter_transactions(&snapshot.transactions, &filter);

    Ok(Json(TransactionsResponse {
        total_count: snapshot.transactions.len(),
        filtered_count: transactions.len(),
        transactions,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_unfiltered() {
        let json = body_json(get(loaded_state().await, "/api/transactions").await).await;
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["filteredCount"], 3);
    }

    #[tokio::test]
    async fn test_combined_filters() {
        let json = body_json(
            get(loaded_state().await, "/api/transactions?search=txn&type=WITHDRAWAL&account=1").await,
        )
        .await;
        assert_eq!(json["filteredCount"], 1);
        assert_eq!(json["transactions"][0]["type"], "WITHDRAWAL");
    }

    #[tokio::test]
    async fn test_all_values() {
        let json = body_json(get(loaded_state().await, "/api/transactions?type=ALL&account=all&search=").await).await;
        assert_eq!(json["filteredCount"], 3);
    }

    #[tokio::test]
    async fn test_invalid_type() {
        let response = get(loaded_state().await, "/api/transactions?type=LOAN").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }
}
