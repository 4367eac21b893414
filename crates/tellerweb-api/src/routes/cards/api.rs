//! Cards API endpoints

use crate::{today, ApiError, ApiResult, AppState};
use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tellerweb_core::cards::{format_card_number, format_expiry, mask_card_number};
use tellerweb_core::{
    available_limit, card_actions, effective_status, eligible_card_types_for, eligible_withdrawal_cards,
    reconcile_selection, CardActions, CardStatus, CardType, CoreError, WithdrawalMethod,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EligibilityQuery {
    pub account_id: Option<u64>,
    pub selected: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponse {
    pub account_id: Option<u64>,
    pub available: Vec<CardType>,
    pub disabled: BTreeMap<CardType, String>,
    /// Selection after switching away from a disabled type
    pub selected: Option<CardType>,
}

/// Card types the account may request, with the reconciled selection
pub async fn api_card_eligibility(
    State(state): State<AppState>,
    Query(query): Query<EligibilityQuery>,
) -> ApiResult<Json<EligibilityResponse>> {
    let selected = match query.selected.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<CardType>().map_err(ApiError::bad_request)?),
    };

    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    let eligibility = eligible_card_types_for(&snapshot.cards, query.account_id, today());
    let selected = reconcile_selection(selected, &eligibility);

    Ok(Json(EligibilityResponse {
        account_id: query.account_id,
        available: eligibility.available,
        disabled: eligibility.disabled,
        selected,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardActionsResponse {
    pub card_id: u64,
    pub status: CardStatus,
    pub masked_card_number: String,
    /// Full number grouped by four, shown when the card is revealed
    pub card_number: String,
    pub expiry: String,
    pub available_limit: Decimal,
    pub actions: CardActions,
}

pub async fn api_card_actions(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<CardActionsResponse>> {
    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    let card = snapshot.card(id).ok_or(CoreError::CardNotFound { id })?;
    let today = today();

    Ok(Json(CardActionsResponse {
        card_id: card.id,
        status: effective_status(card, today),
        masked_card_number: card
            .masked_card_number
            .clone()
            .unwrap_or_else(|| mask_card_number(&card.card_number)),
        card_number: format_card_number(&card.card_number),
        expiry: format_expiry(card.expiry_date),
        available_limit: available_limit(card),
        actions: card_actions(card, today),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalCardsQuery {
    pub account_id: u64,
    pub method: String,
}

/// Option shown in the withdrawal card picker
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalCard {
    pub id: u64,
    pub card_type: CardType,
    pub masked_card_number: String,
    pub available_limit: Decimal,
}

pub async fn api_withdrawal_cards(
    State(state): State<AppState>,
    Query(query): Query<WithdrawalCardsQuery>,
) -> ApiResult<Json<Vec<WithdrawalCard>>> {
    let method: WithdrawalMethod = query.method.parse().map_err(ApiError::bad_request)?;
    if method != WithdrawalMethod::Atm {
        return Ok(Json(Vec::new()));
    }

    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    if snapshot.account(query.account_id).is_none() {
        return Err(CoreError::AccountNotFound { id: query.account_id }.into());
    }

    let cards = eligible_withdrawal_cards(&snapshot.cards, query.account_id, method)
        .into_iter()
        .map(|card| WithdrawalCard {
            id: card.id,
            card_type: card.card_type,
            masked_card_number: mask_card_number(&card.card_number),
            available_limit: available_limit(card),
        })
        .collect();
    Ok(Json(cards))
}
