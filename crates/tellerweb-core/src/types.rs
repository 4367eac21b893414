//! Enumerations shared by the banking records

use serde::{Deserialize, Serialize};

/// Account type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Checking,
    Savings,
    Investment,
}

impl AccountType {
    /// Types offered when opening a new account, in display order
    pub const OFFERED: [AccountType; 3] = [
        AccountType::Savings,
        AccountType::Checking,
        AccountType::Investment,
    ];
}

impl std::str::FromStr for AccountType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CHECKING" => Ok(AccountType::Checking),
            "SAVINGS" => Ok(AccountType::Savings),
            "INVESTMENT" => Ok(AccountType::Investment),
            _ => Err(format!("Invalid account type: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Checking => write!(f, "CHECKING"),
            AccountType::Savings => write!(f, "SAVINGS"),
            AccountType::Investment => write!(f, "INVESTMENT"),
        }
    }
}

/// Account status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Closed,
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus::Active
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(AccountStatus::Active),
            "CLOSED" => Ok(AccountStatus::Closed),
            _ => Err(format!("Invalid account status: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "ACTIVE"),
            AccountStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Card type enumeration
///
/// Variant order is the order in which replacement selections are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Debit,
    Credit,
    Virtual,
}

impl CardType {
    /// Fixed selection order
    pub const ALL: [CardType; 3] = [CardType::Debit, CardType::Credit, CardType::Virtual];
}

impl std::str::FromStr for CardType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBIT" => Ok(CardType::Debit),
            "CREDIT" => Ok(CardType::Credit),
            "VIRTUAL" => Ok(CardType::Virtual),
            _ => Err(format!("Invalid card type. Valid types: DEBIT, CREDIT, VIRTUAL (got {})", s)),
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardType::Debit => write!(f, "DEBIT"),
            CardType::Credit => write!(f, "CREDIT"),
            CardType::Virtual => write!(f, "VIRTUAL"),
        }
    }
}

/// Card status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Active,
    Blocked,
    Expired,
    Cancelled,
}

impl CardStatus {
    /// Statuses that still hold the card's slot on its account
    pub fn is_live(&self) -> bool {
        matches!(self, CardStatus::Active | CardStatus::Blocked)
    }
}

impl std::str::FromStr for CardStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(CardStatus::Active),
            "BLOCKED" => Ok(CardStatus::Blocked),
            "EXPIRED" => Ok(CardStatus::Expired),
            "CANCELLED" => Ok(CardStatus::Cancelled),
            _ => Err(format!("Invalid card status: {}", s)),
        }
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardStatus::Active => write!(f, "ACTIVE"),
            CardStatus::Blocked => write!(f, "BLOCKED"),
            CardStatus::Expired => write!(f, "EXPIRED"),
            CardStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Transaction type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    TransferOut,
    TransferIn,
    InternalTransfer,
}

impl TransactionType {
    /// Money entering the account
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionType::Deposit | TransactionType::TransferIn)
    }

    /// Money leaving the account (internal transfers count as neither)
    pub fn is_debit(&self) -> bool {
        matches!(self, TransactionType::Withdrawal | TransactionType::TransferOut)
    }

    /// `+` for credits, `-` for everything else
    pub fn sign(&self) -> char {
        if self.is_credit() {
            '+'
        } else {
            '-'
        }
    }

    /// Wire name with underscores replaced by spaces
    pub fn label(&self) -> String {
        self.to_string().replace('_', " ")
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            "TRANSFER_OUT" => Ok(TransactionType::TransferOut),
            "TRANSFER_IN" => Ok(TransactionType::TransferIn),
            "INTERNAL_TRANSFER" => Ok(TransactionType::InternalTransfer),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "DEPOSIT"),
            TransactionType::Withdrawal => write!(f, "WITHDRAWAL"),
            TransactionType::TransferOut => write!(f, "TRANSFER_OUT"),
            TransactionType::TransferIn => write!(f, "TRANSFER_IN"),
            TransactionType::InternalTransfer => write!(f, "INTERNAL_TRANSFER"),
        }
    }
}

/// Withdrawal method enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawalMethod {
    Atm,
    Branch,
    Online,
}

impl std::str::FromStr for WithdrawalMethod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ATM" => Ok(WithdrawalMethod::Atm),
            "BRANCH" => Ok(WithdrawalMethod::Branch),
            "ONLINE" => Ok(WithdrawalMethod::Online),
            _ => Err(format!("Invalid withdrawal method: {}", s)),
        }
    }
}

impl std::fmt::Display for WithdrawalMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WithdrawalMethod::Atm => write!(f, "ATM"),
            WithdrawalMethod::Branch => write!(f, "BRANCH"),
            WithdrawalMethod::Online => write!(f, "ONLINE"),
        }
    }
}

/// Deposit method enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositMethod {
    Card,
    BankTransfer,
    Cash,
    Check,
}

impl std::str::FromStr for DepositMethod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CARD" => Ok(DepositMethod::Card),
            "BANK_TRANSFER" => Ok(DepositMethod::BankTransfer),
            "CASH" => Ok(DepositMethod::Cash),
            "CHECK" => Ok(DepositMethod::Check),
            _ => Err(format!("Invalid deposit method: {}", s)),
        }
    }
}

impl std::fmt::Display for DepositMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepositMethod::Card => write!(f, "CARD"),
            DepositMethod::BankTransfer => write!(f, "BANK_TRANSFER"),
            DepositMethod::Cash => write!(f, "CASH"),
            DepositMethod::Check => write!(f, "CHECK"),
        }
    }
}
