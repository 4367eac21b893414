//! Transaction search and filtering

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::Transaction;
use crate::types::TransactionType;

/// Transaction type criterion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl TypeFilter {
    pub fn matches(&self, transaction_type: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == transaction_type,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("ALL") {
            return Ok(TypeFilter::All);
        }
        TransactionType::from_str(s).map(TypeFilter::Only)
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeFilter::All => write!(f, "ALL"),
            TypeFilter::Only(t) => write!(f, "{}", t),
        }
    }
}

/// Account criterion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccountFilter {
    #[default]
    All,
    Only(u64),
}

impl AccountFilter {
    pub fn matches(&self, account_id: u64) -> bool {
        match self {
            AccountFilter::All => true,
            AccountFilter::Only(wanted) => *wanted == account_id,
        }
    }
}

impl FromStr for AccountFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("ALL") {
            return Ok(AccountFilter::All);
        }
        s.parse::<u64>()
            .map(AccountFilter::Only)
            .map_err(|_| format!("Invalid account filter: {}", s))
    }
}

impl std::fmt::Display for AccountFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountFilter::All => write!(f, "ALL"),
            AccountFilter::Only(id) => write!(f, "{}", id),
        }
    }
}

/// Combined search criteria; the default passes everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub search_term: String,
    pub transaction_type: TypeFilter,
    pub account: AccountFilter,
}

/// Raw query-string form of [`TransactionFilter`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub account: Option<String>,
}

impl TryFrom<TransactionQuery> for TransactionFilter {
    type Error = String;

    fn try_from(query: TransactionQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            search_term: query.search.unwrap_or_default(),
            transaction_type: query.transaction_type.as_deref().unwrap_or("").parse()?,
            account: query.account.as_deref().unwrap_or("").parse()?,
        })
    }
}

impl TransactionFilter {
    /// Search term matches description or reference, ignoring case
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_search(transaction)
            && self.transaction_type.matches(transaction.transaction_type)
            && self.account.matches(transaction.account_id)
    }

    fn matches_search(&self, transaction: &Transaction) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        transaction.description.to_lowercase().contains(&needle)
            || transaction.transaction_reference.to_lowercase().contains(&needle)
    }
}

/// Keep matching transactions in their original order
pub fn filter_transactions(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountType;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn tx(id: u64, account_id: u64, transaction_type: TransactionType, reference: &str, description: &str) -> Transaction {
        Transaction {
            id,
            account_id,
            account_number: "1000000001".to_string(),
            account_type: AccountType::Checking,
            transaction_reference: reference.to_string(),
            transaction_type,
            amount: Decimal::from(10),
            balance_after: Decimal::from(100),
            description: description.to_string(),
            status: "COMPLETED".to_string(),
            recipient_account_number: None,
            recipient_name: None,
            deposit_method: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, id as u32)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, 1, TransactionType::Deposit, "TXN001", "Salary January"),
            tx(2, 1, TransactionType::Withdrawal, "TXN002", "ATM cash"),
            tx(3, 2, TransactionType::TransferOut, "REF-SAL", "Rent"),
            tx(4, 2, TransactionType::Deposit, "TXN004", "Refund"),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<u64> {
        transactions.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_default_filter_returns_input() {
        let all = sample();
        assert_eq!(filter_transactions(&all, &TransactionFilter::default()), all);
    }

    #[test]
    fn test_search_matches_description_or_reference() {
        let filter = TransactionFilter {
            search_term: "SAL".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_transactions(&sample(), &filter)), vec![1, 3]);
    }

    #[test]
    fn test_type_and_account_combine() {
        let filter = TransactionFilter {
            search_term: String::new(),
            transaction_type: TypeFilter::Only(TransactionType::Deposit),
            account: AccountFilter::Only(2),
        };
        assert_eq!(ids(&filter_transactions(&sample(), &filter)), vec![4]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = TransactionFilter {
            search_term: "a".to_string(),
            transaction_type: TypeFilter::All,
            account: AccountFilter::Only(1),
        };
        let once = filter_transactions(&sample(), &filter);
        let twice = filter_transactions(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let filter = TransactionFilter {
            search_term: "mortgage".to_string(),
            ..Default::default()
        };
        assert!(filter_transactions(&sample(), &filter).is_empty());
    }

    #[test]
    fn test_parse_query() {
        let filter = TransactionFilter::try_from(TransactionQuery {
            search: Some("rent".to_string()),
            transaction_type: Some("all".to_string()),
            account: Some("2".to_string()),
        })
        .unwrap();
        assert_eq!(filter.transaction_type, TypeFilter::All);
        assert_eq!(filter.account, AccountFilter::Only(2));

        let filter = TransactionFilter::try_from(TransactionQuery {
            transaction_type: Some("TRANSFER_IN".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.transaction_type, TypeFilter::Only(TransactionType::TransferIn));
        assert_eq!(filter.account, AccountFilter::All);

        assert!("abc".parse::<AccountFilter>().is_err());
        assert!("LOAN".parse::<TypeFilter>().is_err());
    }
}
