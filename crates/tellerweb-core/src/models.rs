//! Core data models for the banking client
//!
//! Records mirror the camelCase JSON served by the remote banking API. The
//! client never mutates them; a fresh [`BankSnapshot`] replaces the old one
//! after every money-movement action.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{AccountStatus, AccountType, CardStatus, CardType, TransactionType};

/// Account information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: u64,
    pub account_number: String,
    pub account_type: AccountType,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub balance: Decimal,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default, with = "lenient_datetime::option")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// `CHECKING - ****7890`
    pub fn label(&self) -> String {
        format!(
            "{} - ****{}",
            self.account_type,
            tellerweb_utils::last4(&self.account_number)
        )
    }
}

/// Payment card information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u64,
    #[serde(default)]
    pub card_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_card_number: Option<String>,
    #[serde(default)]
    pub card_holder_name: String,
    pub card_type: CardType,
    pub expiry_date: NaiveDate,
    pub spending_limit: Decimal,
    #[serde(default)]
    pub current_spent: Decimal,
    pub status: CardStatus,
    #[serde(default)]
    pub is_virtual: bool,
    pub account_id: u64,
    #[serde(default)]
    pub account_number: String,
    #[serde(default, with = "lenient_datetime::option")]
    pub created_at: Option<NaiveDateTime>,
}

impl Card {
    /// Expiry date is strictly before `today`
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }
}

/// Saved transfer destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: u64,
    pub beneficiary_name: String,
    pub account_number: String,
    pub bank_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, with = "lenient_datetime::option")]
    pub created_at: Option<NaiveDateTime>,
}

impl Beneficiary {
    /// Nickname when set, otherwise the beneficiary name
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.trim().is_empty() => nickname,
            _ => &self.beneficiary_name,
        }
    }

    /// Up to two upper-cased initials of the display name
    pub fn initials(&self) -> String {
        initials(self.display_name())
    }
}

/// First letter of the first two words, upper-cased
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .take(2)
        .collect()
}

/// Transaction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub account_id: u64,
    #[serde(default)]
    pub account_number: String,
    pub account_type: AccountType,
    pub transaction_reference: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub balance_after: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_transaction_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_method: Option<String>,
    #[serde(with = "lenient_datetime")]
    pub created_at: NaiveDateTime,
}

fn default_transaction_status() -> String {
    "COMPLETED".to_string()
}

impl Transaction {
    /// `CHECKING - ****7890`
    pub fn account_label(&self) -> String {
        format!(
            "{} - ****{}",
            self.account_type,
            tellerweb_utils::last4(&self.account_number)
        )
    }
}

/// User profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub two_factor_enabled: bool,
    #[serde(default, with = "lenient_datetime::option")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "lenient_datetime::option")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Latest fetched copy of everything the client shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankSnapshot {
    pub accounts: Vec<Account>,
    pub cards: Vec<Card>,
    pub beneficiaries: Vec<Beneficiary>,
    pub transactions: Vec<Transaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<User>,
}

impl BankSnapshot {
    pub fn account(&self, id: u64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn card(&self, id: u64) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

/// Timestamps arrive as local date-times (`2024-01-15T10:30:00`, optionally
/// with fractional seconds) or as RFC 3339 with an offset, which is
/// converted to UTC.
pub mod lenient_datetime {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        s.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()))
            .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_from_api_json() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 7,
            "accountId": 1,
            "accountNumber": "1002003004",
            "accountType": "CHECKING",
            "transactionReference": "TXN123",
            "type": "DEPOSIT",
            "amount": 100.5,
            "balanceAfter": "1100.50",
            "description": "Salary",
            "status": "COMPLETED",
            "createdAt": "2024-01-15T10:30:00.123"
        }))
        .unwrap();

        assert_eq!(tx.transaction_type, TransactionType::Deposit);
        assert_eq!(tx.amount.to_string(), "100.5");
        assert_eq!(tx.account_label(), "CHECKING - ****3004");
        assert_eq!(tx.created_at.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_rfc3339_timestamp_converted_to_utc() {
        let parsed = lenient_datetime::parse("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "10:00");
    }

    #[test]
    fn test_snapshot_lists_default_to_empty() {
        let snapshot: BankSnapshot = serde_json::from_value(json!({})).unwrap();
        assert!(snapshot.accounts.is_empty());
        assert!(snapshot.profile.is_none());
    }

    #[test]
    fn test_beneficiary_display_name() {
        let mut b = Beneficiary {
            id: 1,
            beneficiary_name: "Jane Smith".to_string(),
            account_number: "1234567890".to_string(),
            bank_name: "First Bank".to_string(),
            bank_code: None,
            nickname: Some("Mom".to_string()),
            created_at: None,
        };
        assert_eq!(b.display_name(), "Mom");
        b.nickname = Some("  ".to_string());
        assert_eq!(b.display_name(), "Jane Smith");
        assert_eq!(b.initials(), "JS");
    }

    #[test]
    fn test_initials_truncates() {
        assert_eq!(initials("mary ann lee"), "MA");
        assert_eq!(initials(""), "");
    }
}
