//! Beneficiaries API endpoints

use crate::{ApiResult, AppState};
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tellerweb_core::Beneficiary;

/// Beneficiary with its display fields resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryItem {
    #[serde(flatten)]
    pub beneficiary: Beneficiary,
    pub display_name: String,
    pub initials: String,
}

impl From<&Beneficiary> for BeneficiaryItem {
    fn from(beneficiary: &Beneficiary) -> Self {
        Self {
            display_name: beneficiary.display_name().to_string(),
            initials: beneficiary.initials(),
            beneficiary: beneficiary.clone(),
        }
    }
}

pub async fn api_beneficiaries(State(state): State<AppState>) -> ApiResult<Json<Vec<BeneficiaryItem>>> {
    let session = state.session.read().await;
    let snapshot = session.snapshot()?;
    Ok(Json(snapshot.beneficiaries.iter().map(BeneficiaryItem::from).collect()))
}
