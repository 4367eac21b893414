//! Account and balance aggregation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Account;
use crate::types::AccountType;

/// Sum of balances across ACTIVE accounts
pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .filter(|a| a.is_active())
        .map(|a| a.balance)
        .sum()
}

pub fn active_accounts(accounts: &[Account]) -> Vec<&Account> {
    accounts.iter().filter(|a| a.is_active()).collect()
}

pub fn closed_accounts(accounts: &[Account]) -> Vec<&Account> {
    accounts.iter().filter(|a| !a.is_active()).collect()
}

/// Offered account types the user does not already hold an ACTIVE account of
pub fn available_account_types(accounts: &[Account]) -> Vec<AccountType> {
    AccountType::OFFERED
        .iter()
        .copied()
        .filter(|t| !accounts.iter().any(|a| a.is_active() && a.account_type == *t))
        .collect()
}

/// Accounts page aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub total_balance: Decimal,
    pub active_accounts: Vec<Account>,
    pub closed_accounts: Vec<Account>,
    pub available_account_types: Vec<AccountType>,
}

impl AccountSummary {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        Self {
            total_balance: total_balance(accounts),
            active_accounts: active_accounts(accounts).into_iter().cloned().collect(),
            closed_accounts: closed_accounts(accounts).into_iter().cloned().collect(),
            available_account_types: available_account_types(accounts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountStatus;
    use std::str::FromStr;

    fn account(id: u64, account_type: AccountType, balance: &str, status: AccountStatus) -> Account {
        Account {
            id,
            account_number: format!("100000000{}", id),
            account_type,
            currency: "USD".to_string(),
            balance: Decimal::from_str(balance).unwrap(),
            status,
            created_at: None,
        }
    }

    fn sample() -> Vec<Account> {
        vec![
            account(1, AccountType::Checking, "1500.25", AccountStatus::Active),
            account(2, AccountType::Savings, "300", AccountStatus::Closed),
            account(3, AccountType::Investment, "99.75", AccountStatus::Active),
        ]
    }

    #[test]
    fn test_total_balance_ignores_closed() {
        assert_eq!(total_balance(&sample()), Decimal::from(1600));
        assert_eq!(total_balance(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_partition_by_status() {
        let accounts = sample();
        let active: Vec<u64> = active_accounts(&accounts).iter().map(|a| a.id).collect();
        let closed: Vec<u64> = closed_accounts(&accounts).iter().map(|a| a.id).collect();
        assert_eq!(active, vec![1, 3]);
        assert_eq!(closed, vec![2]);
    }

    #[test]
    fn test_available_account_types() {
        assert_eq!(available_account_types(&sample()), vec![AccountType::Savings]);
        assert_eq!(available_account_types(&[]), AccountType::OFFERED.to_vec());
    }

    #[test]
    fn test_summary() {
        let summary = AccountSummary::from_accounts(&sample());
        assert_eq!(summary.active_accounts.len(), 2);
        assert_eq!(summary.closed_accounts.len(), 1);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("availableAccountTypes").is_some());
    }
}
