//! Card routes - eligibility, withdrawal card selection and lifecycle actions

pub mod api;

pub use api::{
    api_card_actions,
    api_card_eligibility,
    api_withdrawal_cards,
    CardActionsResponse,
    EligibilityResponse,
    WithdrawalCard,
};
