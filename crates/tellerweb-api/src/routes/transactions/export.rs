//! Statement export endpoints

use super::parse_filter;
use crate::{now, ApiResult, AppState};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tellerweb_core::{
    filter_transactions, render_csv, render_statement, statement_account_label, CoreError, StatementOptions,
    TransactionQuery,
};
use tellerweb_core::export::HTML_MIME_TYPE;

/// CSV attachment of the filtered transactions
pub async fn api_export_csv(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Response> {
    let filter = parse_filter(query)?;
    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    let transactions = filter_transactions(&snapshot.transactions, &filter);

    let options = StatementOptions::from(&state.config.statement);
    let export = render_csv(&transactions, now(), &options).map_err(CoreError::from)?;
    log::info!(
        target: "tellerweb::api",
        "Exported {} transactions to {}",
        transactions.len(),
        export.file_name
    );

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, export.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

/// Printable HTML statement of the filtered transactions
pub async fn api_statement(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Response> {
    let filter = parse_filter(query)?;
    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    let transactions = filter_transactions(&snapshot.transactions, &filter);

    let options = StatementOptions::from(&state.config.statement);
    let label = statement_account_label(&snapshot.accounts, filter.account);
    let document = render_statement(&transactions, &label, now(), &options).map_err(CoreError::from)?;
    log::info!(
        target: "tellerweb::api",
        "Rendered statement for {} ({} transactions)",
        document.account_label,
        document.summary.transaction_count
    );
    Ok(([(header::CONTENT_TYPE, HTML_MIME_TYPE)], document.html).into_response())
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::{header, StatusCode};

    #[tokio::test]
    async fn test_csv_download() {
        let response = get(loaded_state().await, "/api/transactions/export.csv?account=1").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv;charset=utf-8");
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment; filename=\"transaction_statement_"));
        assert!(disposition.ends_with(".csv\""));

        let body = body_text(response).await;
        let lines: Vec<&str> = body.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(",+$100.50,"));
        assert!(lines[2].contains(",-$75.00,"));
    }

    #[tokio::test]
    async fn test_empty_csv_is_422() {
        let response = get(loaded_state().await, "/api/transactions/export.csv?search=nothing-matches").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": "NOTHING_TO_EXPORT", "message": "No transactions to download"})
        );
    }

    #[tokio::test]
    async fn test_statement_html() {
        let response = get(loaded_state().await, "/api/transactions/statement?account=1").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html;charset=utf-8");

        let html = body_text(response).await;
        assert!(html.contains("<span>CHECKING - ****1234</span>"));
        assert!(html.contains("<span>+$100.50</span>"));
        assert!(html.contains("<span>-$75.00</span>"));
        assert!(html.contains("<span>+$25.50</span>"));
    }

    #[tokio::test]
    async fn test_statement_all_accounts() {
        let html = body_text(get(loaded_state().await, "/api/transactions/statement").await).await;
        assert!(html.contains("<span>All Accounts</span>"));
        assert!(html.contains("<span>3</span>"));
    }

    #[tokio::test]
    async fn test_empty_statement_is_422() {
        let response = get(loaded_state().await, "/api/transactions/statement?type=INTERNAL_TRANSFER").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
