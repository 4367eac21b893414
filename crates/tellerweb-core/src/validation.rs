//! Field-level form validation
//!
//! Validation never fails as an operation: each form reports a list of
//! field errors, empty when the form may be submitted.

use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::cards::{eligible_card_types, withdrawal_card_id};
use crate::error::{CoreError, CoreResult};
use crate::models::Card;
use crate::types::{CardType, DepositMethod, WithdrawalMethod};

fn account_number_pattern() -> &'static Regex {
    static PATTERN: OnceCell<Regex> = OnceCell::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{10}$").unwrap())
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceCell<Regex> = OnceCell::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+]?[0-9]{10,15}$").unwrap())
}

fn password_special_pattern() -> &'static Regex {
    static PATTERN: OnceCell<Regex> = OnceCell::new();
    PATTERN.get_or_init(|| Regex::new(r"[@#$%^&+=]").unwrap())
}

const PASSWORD_RULES: &str =
    "Password must be at least 8 characters with a digit, a lowercase letter, an uppercase letter and one of @#$%^&+=";

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Default)]
struct Errors(Vec<FieldError>);

impl Errors {
    fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError::new(field, message));
    }

    fn require<T>(&mut self, field: &str, value: &Option<T>, message: &str) {
        if value.is_none() {
            self.push(field, message);
        }
    }

    fn require_text(&mut self, field: &str, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, message);
            return false;
        }
        true
    }

    fn min_len(&mut self, field: &str, value: &str, min: usize, label: &str) {
        if self.require_text(field, value, &format!("{} is required", label)) && value.trim().chars().count() < min {
            self.push(field, &format!("{} must be at least {} characters", label, min));
        }
    }

    fn amount(&mut self, field: &str, amount: Option<Decimal>) {
        match amount {
            None => self.push(field, "Amount is required"),
            Some(value) if value < Decimal::new(1, 2) => {
                self.push(field, "Amount must be greater than zero")
            }
            Some(_) => {}
        }
    }

    fn minimum(&mut self, field: &str, value: Option<Decimal>, min: i64, label: &str) {
        match value {
            None => self.push(field, &format!("{} is required", label)),
            Some(v) if v < Decimal::from(min) => {
                self.push(field, &format!("{} must be at least {}", label, min))
            }
            Some(_) => {}
        }
    }

    fn account_number(&mut self, field: &str, value: &str) {
        if self.require_text(field, value, "Account number is required") && !account_number_pattern().is_match(value) {
            self.push(field, "Account number must be exactly 10 digits");
        }
    }

    fn one_of<T: FromStr>(&mut self, field: &str, value: &str, label: &str) {
        if self.require_text(field, value, &format!("{} is required", label)) && value.parse::<T>().is_err() {
            self.push(field, &format!("Invalid {}", label.to_lowercase()));
        }
    }

    fn finish(self) -> Vec<FieldError> {
        self.0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepositForm {
    pub account_id: Option<u64>,
    pub amount: Option<Decimal>,
    pub deposit_method: String,
    pub description: String,
}

impl DepositForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Errors::default();
        errors.require("accountId", &self.account_id, "Account is required");
        errors.amount("amount", self.amount);
        errors.one_of::<DepositMethod>("depositMethod", &self.deposit_method, "Deposit method");
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithdrawalForm {
    pub account_id: Option<u64>,
    pub amount: Option<Decimal>,
    pub withdrawal_method: String,
    pub card_id: Option<u64>,
    pub description: String,
}

impl WithdrawalForm {
    /// `cards` are the snapshot's cards; only ATM withdrawals may name one
    pub fn validate(&self, cards: &[Card]) -> Vec<FieldError> {
        let mut errors = Errors::default();
        errors.require("accountId", &self.account_id, "Account is required");
        errors.amount("amount", self.amount);
        errors.one_of::<WithdrawalMethod>("withdrawalMethod", &self.withdrawal_method, "Withdrawal method");

        if let Some(card_id) = self.card_id {
            match self.withdrawal_method.parse::<WithdrawalMethod>() {
                Ok(WithdrawalMethod::Atm) => {
                    let attached = self.account_id.and_then(|account_id| {
                        withdrawal_card_id(cards, account_id, WithdrawalMethod::Atm, Some(card_id))
                    });
                    if attached.is_none() {
                        errors.push("cardId", "Card is not an active card of this account");
                    }
                }
                Ok(_) => errors.push("cardId", "Only ATM withdrawals use a card"),
                Err(_) => {}
            }
        }
        errors.finish()
    }
}

/// Transfer to another customer's account
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferForm {
    pub from_account_id: Option<u64>,
    pub recipient_account_number: String,
    pub amount: Option<Decimal>,
    pub description: String,
}

impl TransferForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Errors::default();
        errors.require("fromAccountId", &self.from_account_id, "Source account is required");
        errors.account_number("recipientAccountNumber", &self.recipient_account_number);
        errors.amount("amount", self.amount);
        errors.finish()
    }
}

/// Transfer between the user's own accounts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternalTransferForm {
    pub from_account_id: Option<u64>,
    pub to_account_id: Option<u64>,
    pub amount: Option<Decimal>,
    pub description: String,
}

impl InternalTransferForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Errors::default();
        errors.require("fromAccountId", &self.from_account_id, "Source account is required");
        errors.require("toAccountId", &self.to_account_id, "Destination account is required");
        if let (Some(from), Some(to)) = (self.from_account_id, self.to_account_id) {
            if from == to {
                errors.push("toAccountId", "Cannot transfer to the same account");
            }
        }
        errors.amount("amount", self.amount);
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeneficiaryForm {
    pub beneficiary_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub bank_code: String,
    pub nickname: String,
}

impl BeneficiaryForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Errors::default();
        errors.min_len("beneficiaryName", &self.beneficiary_name, 2, "Beneficiary name");
        errors.account_number("accountNumber", &self.account_number);
        errors.require_text("bankName", &self.bank_name, "Bank name is required");
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardForm {
    pub account_id: Option<u64>,
    pub card_type: String,
    pub spending_limit: Option<Decimal>,
}

impl CardForm {
    /// Card type must also be one the account is eligible for today
    pub fn validate(&self, cards: &[Card], today: NaiveDate) -> Vec<FieldError> {
        let mut errors = Errors::default();
        errors.require("accountId", &self.account_id, "Account is required");
        if errors.require_text("cardType", &self.card_type, "Card type is required") {
            match self.card_type.parse::<CardType>() {
                Err(message) => errors.push("cardType", &message),
                Ok(card_type) => {
                    if let Some(account_id) = self.account_id {
                        let eligibility = eligible_card_types(cards, account_id, today);
                        if let Some(reason) = eligibility.reason(card_type) {
                            errors.push("cardType", reason);
                        }
                    }
                }
            }
        }
        errors.minimum("spendingLimit", self.spending_limit, 100, "Spending limit");
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardLimitForm {
    pub card_id: Option<u64>,
    pub new_limit: Option<Decimal>,
}

impl CardLimitForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Errors::default();
        errors.require("cardId", &self.card_id, "Card is required");
        errors.minimum("newLimit", self.new_limit, 100, "New limit");
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Errors::default();
        errors.min_len("firstName", &self.first_name, 2, "First name");
        errors.min_len("lastName", &self.last_name, 2, "Last name");
        if errors.require_text("phoneNumber", &self.phone_number, "Phone number is required")
            && !phone_pattern().is_match(&self.phone_number)
        {
            errors.push("phoneNumber", "Phone number must be 10 to 15 digits, optionally starting with +");
        }
        errors.require_text("address", &self.address, "Address is required");
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// At least 8 characters with a digit, lower, upper and special character
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password_special_pattern().is_match(password)
}

impl PasswordForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Errors::default();
        if self.current_password.is_empty() {
            errors.push("currentPassword", "Current password is required");
        }
        if self.new_password.is_empty() {
            errors.push("newPassword", "New password is required");
        } else if !is_strong_password(&self.new_password) {
            errors.push("newPassword", PASSWORD_RULES);
        }
        if self.confirm_password != self.new_password {
            errors.push("confirmPassword", "Passwords do not match");
        }
        errors.finish()
    }
}

/// Forms accepted by the validation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Deposit,
    Withdrawal,
    Transfer,
    InternalTransfer,
    Beneficiary,
    Card,
    CardLimit,
    Profile,
    Password,
}

impl FromStr for FormKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "deposit" => Ok(FormKind::Deposit),
            "withdrawal" => Ok(FormKind::Withdrawal),
            "transfer" => Ok(FormKind::Transfer),
            "internal-transfer" => Ok(FormKind::InternalTransfer),
            "beneficiary" => Ok(FormKind::Beneficiary),
            "card" => Ok(FormKind::Card),
            "card-limit" => Ok(FormKind::CardLimit),
            "profile" => Ok(FormKind::Profile),
            "password" => Ok(FormKind::Password),
            _ => Err(format!("Unknown form: {}", s)),
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormKind::Deposit => write!(f, "deposit"),
            FormKind::Withdrawal => write!(f, "withdrawal"),
            FormKind::Transfer => write!(f, "transfer"),
            FormKind::InternalTransfer => write!(f, "internal-transfer"),
            FormKind::Beneficiary => write!(f, "beneficiary"),
            FormKind::Card => write!(f, "card"),
            FormKind::CardLimit => write!(f, "card-limit"),
            FormKind::Profile => write!(f, "profile"),
            FormKind::Password => write!(f, "password"),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> CoreResult<T> {
    serde_json::from_value(body).map_err(|e| CoreError::ValidationError {
        message: e.to_string(),
    })
}

/// Decode a JSON form body and validate it
///
/// Fails only when the body cannot be decoded as the requested form.
pub fn validate_form(
    kind: FormKind,
    body: serde_json::Value,
    cards: &[Card],
    today: NaiveDate,
) -> CoreResult<Vec<FieldError>> {
    let errors = match kind {
        FormKind::Deposit => decode::<DepositForm>(body)?.validate(),
        FormKind::Withdrawal => decode::<WithdrawalForm>(body)?.validate(cards),
        FormKind::Transfer => decode::<TransferForm>(body)?.validate(),
        FormKind::InternalTransfer => decode::<InternalTransferForm>(body)?.validate(),
        FormKind::Beneficiary => decode::<BeneficiaryForm>(body)?.validate(),
        FormKind::Card => decode::<CardForm>(body)?.validate(cards, today),
        FormKind::CardLimit => decode::<CardLimitForm>(body)?.validate(),
        FormKind::Profile => decode::<ProfileForm>(body)?.validate(),
        FormKind::Password => decode::<PasswordForm>(body)?.validate(),
    };
    Ok(errors)
}
