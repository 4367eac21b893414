//! Card rules: which card types an account may request, which cards can fund
//! an ATM withdrawal, and which lifecycle actions are legal today.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Card;
use crate::types::{CardStatus, CardType, WithdrawalMethod};

pub const REASON_DEBIT_EXISTS: &str = "You already have an active DEBIT card for this account";
pub const REASON_CREDIT_EXISTS: &str = "You already have an active CREDIT card for this account";
pub const REASON_VIRTUAL_NEEDS_NO_DEBIT: &str =
    "Virtual cards are only available when you don't have a Debit card";

/// Card types an account may currently request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEligibility {
    /// Allowed types in selection order
    pub available: Vec<CardType>,
    /// Disabled types with the reason shown to the user
    pub disabled: BTreeMap<CardType, String>,
}

impl CardEligibility {
    /// Nothing disabled; used when no account is selected
    pub fn unrestricted() -> Self {
        Self {
            available: CardType::ALL.to_vec(),
            disabled: BTreeMap::new(),
        }
    }

    pub fn is_disabled(&self, card_type: CardType) -> bool {
        self.disabled.contains_key(&card_type)
    }

    /// Tooltip for a disabled type, `None` when the type is allowed
    pub fn reason(&self, card_type: CardType) -> Option<&str> {
        self.disabled.get(&card_type).map(String::as_str)
    }
}

/// Cards that still occupy a slot on `account_id`: ACTIVE or BLOCKED and not past expiry
fn live_cards_for<'a>(
    cards: &'a [Card],
    account_id: u64,
    today: NaiveDate,
) -> impl Iterator<Item = &'a Card> {
    cards.iter().filter(move |card| {
        card.account_id == account_id && card.status.is_live() && !card.is_expired_on(today)
    })
}

/// Compute which card types `account_id` may request
///
/// A live DEBIT card disables DEBIT and VIRTUAL; a live CREDIT card disables
/// CREDIT. Cancelled and expired cards never count.
pub fn eligible_card_types(cards: &[Card], account_id: u64, today: NaiveDate) -> CardEligibility {
    let mut has_debit = false;
    let mut has_credit = false;
    for card in live_cards_for(cards, account_id, today) {
        match card.card_type {
            CardType::Debit => has_debit = true,
            CardType::Credit => has_credit = true,
            CardType::Virtual => {}
        }
    }

    let mut disabled = BTreeMap::new();
    if has_debit {
        disabled.insert(CardType::Debit, REASON_DEBIT_EXISTS.to_string());
        disabled.insert(CardType::Virtual, REASON_VIRTUAL_NEEDS_NO_DEBIT.to_string());
    }
    if has_credit {
        disabled.insert(CardType::Credit, REASON_CREDIT_EXISTS.to_string());
    }

    let available = CardType::ALL
        .iter()
        .copied()
        .filter(|t| !disabled.contains_key(t))
        .collect();

    CardEligibility { available, disabled }
}

/// Eligibility for an optional account selection
pub fn eligible_card_types_for(
    cards: &[Card],
    account_id: Option<u64>,
    today: NaiveDate,
) -> CardEligibility {
    match account_id {
        Some(id) => eligible_card_types(cards, id, today),
        None => CardEligibility::unrestricted(),
    }
}

/// Keep `current` if allowed, otherwise switch to the first allowed type
///
/// When every type is disabled there is nothing to switch to and the
/// current selection is returned untouched.
pub fn reconcile_selection(current: Option<CardType>, eligibility: &CardEligibility) -> Option<CardType> {
    match current {
        Some(selected) if eligibility.is_disabled(selected) => {
            eligibility.available.first().copied().or(Some(selected))
        }
        other => other,
    }
}

/// `spending_limit - current_spent`, never below zero
pub fn available_limit(card: &Card) -> Decimal {
    (card.spending_limit - card.current_spent).max(Decimal::ZERO)
}

/// Cards that may fund a withdrawal: ACTIVE cards of the account, ATM only
pub fn eligible_withdrawal_cards<'a>(
    cards: &'a [Card],
    account_id: u64,
    method: WithdrawalMethod,
) -> Vec<&'a Card> {
    if method != WithdrawalMethod::Atm {
        return Vec::new();
    }
    cards
        .iter()
        .filter(|card| card.account_id == account_id && card.status == CardStatus::Active)
        .collect()
}

/// Card id to attach to a withdrawal request
///
/// Only ATM withdrawals carry a card, and only one from the eligible set.
pub fn withdrawal_card_id(
    cards: &[Card],
    account_id: u64,
    method: WithdrawalMethod,
    selected: Option<u64>,
) -> Option<u64> {
    let selected = selected?;
    eligible_withdrawal_cards(cards, account_id, method)
        .into_iter()
        .find(|card| card.id == selected)
        .map(|card| card.id)
}

/// Legal lifecycle actions for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardActions {
    pub can_block: bool,
    pub can_unblock: bool,
    pub can_cancel: bool,
    pub can_update_limit: bool,
}

/// Stored status, or EXPIRED once the expiry date has passed
pub fn effective_status(card: &Card, today: NaiveDate) -> CardStatus {
    match card.status {
        CardStatus::Cancelled => CardStatus::Cancelled,
        _ if card.is_expired_on(today) => CardStatus::Expired,
        status => status,
    }
}

/// Actions follow the stored status; only unblocking also checks expiry
pub fn card_actions(card: &Card, today: NaiveDate) -> CardActions {
    let status = card.status;
    CardActions {
        can_block: !matches!(status, CardStatus::Cancelled | CardStatus::Blocked),
        can_unblock: status == CardStatus::Blocked && !card.is_expired_on(today),
        can_cancel: status != CardStatus::Cancelled,
        can_update_limit: status == CardStatus::Active,
    }
}

/// `**** **** **** 1234` for full card numbers; short numbers pass through
pub fn mask_card_number(card_number: &str) -> String {
    if card_number.chars().count() < 16 {
        return card_number.to_string();
    }
    format!("**** **** **** {}", tellerweb_utils::last4(card_number))
}

/// Group digits in fours: `4111 1111 1111 1111`
pub fn format_card_number(card_number: &str) -> String {
    card_number
        .chars()
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `MM/YY`
pub fn format_expiry(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.month(), date.year() % 100)
}
