//! Validation API endpoint

use crate::{today, ApiError, ApiResult, AppState};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tellerweb_core::{validate_form, FieldError, FormKind};

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub form: String,
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// Validate a form body; field problems are reported, not raised
///
/// Card and withdrawal requests are also checked against the snapshot's cards.
pub async fn api_validate(
    State(state): State<AppState>,
    Path(form): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<ValidationResponse>> {
    let kind: FormKind = form.parse().map_err(|_| ApiError::NotFound {
        resource: format!("form {}", form),
    })?;

    let errors = if matches!(kind, FormKind::Card | FormKind::Withdrawal) {
        let session = state.session.read().await;
        let snapshot = session.snapshot()?;
        validate_form(kind, body, &snapshot.cards, today())?
    } else {
        validate_form(kind, body, &[], today())?
    };

    Ok(Json(ValidationResponse {
        form: kind.to_string(),
        valid: errors.is_empty(),
        errors,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_valid_deposit() {
        let response = post_json(
            empty_state(),
            "/api/validate/deposit",
            json!({"accountId": 1, "amount": 25, "depositMethod": "CASH"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["valid"], true);
        assert_eq!(json["errors"], json!([]));
    }

    #[tokio::test]
    async fn test_same_account_transfer() {
        let json = body_json(
            post_json(
                empty_state(),
                "/api/validate/internal-transfer",
                json!({"fromAccountId": 2, "toAccountId": 2, "amount": 5}),
            )
            .await,
        )
        .await;
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["message"], "Cannot transfer to the same account");
    }

    #[tokio::test]
    async fn test_card_form_uses_snapshot() {
        let json = body_json(
            post_json(
                loaded_state().await,
                "/api/validate/card",
                json!({"accountId": 1, "cardType": "CREDIT", "spendingLimit": 500}),
            )
            .await,
        )
        .await;
        assert_eq!(json["errors"][0]["field"], "cardType");
        assert_eq!(json["errors"][0]["message"], "You already have an active CREDIT card for this account");
    }

    #[tokio::test]
    async fn test_withdrawal_card_checked_against_snapshot() {
        let json = body_json(
            post_json(
                loaded_state().await,
                "/api/validate/withdrawal",
                json!({"accountId": 1, "amount": 20, "withdrawalMethod": "BRANCH", "cardId": 999}),
            )
            .await,
        )
        .await;
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["field"], "cardId");

        let json = body_json(
            post_json(
                loaded_state().await,
                "/api/validate/withdrawal",
                json!({"accountId": 1, "amount": 20, "withdrawalMethod": "ATM", "cardId": 11}),
            )
            .await,
        )
        .await;
        assert_eq!(json["errors"][0]["message"], "Card is not an active card of this account");

        let json = body_json(
            post_json(
                loaded_state().await,
                "/api/validate/withdrawal",
                json!({"accountId": 1, "amount": 20, "withdrawalMethod": "ATM", "cardId": 10}),
            )
            .await,
        )
        .await;
        assert_eq!(json["valid"], true);
    }

    #[tokio::test]
    async fn test_unknown_form() {
        let response = post_json(empty_state(), "/api/validate/loan", json!({})).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let response = post_json(empty_state(), "/api/validate/deposit", json!({"amount": [1]})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}
