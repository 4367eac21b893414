//! Beneficiary routes

pub mod api;

pub use api::{api_beneficiaries, BeneficiaryItem};
