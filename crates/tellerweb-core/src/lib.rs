//! Derived business logic for the banking client
//!
//! Every computation here is a pure function over slices of the latest
//! [`BankSnapshot`]; nothing is cached between calls.

pub mod accounts;
pub mod cards;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod reports;
pub mod session;
pub mod types;
pub mod validation;

pub use accounts::{active_accounts, available_account_types, closed_accounts, total_balance, AccountSummary};
pub use cards::{
    available_limit, card_actions, effective_status, eligible_card_types, eligible_card_types_for,
    eligible_withdrawal_cards, reconcile_selection, withdrawal_card_id, CardActions, CardEligibility,
};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity, ExportError};
pub use export::{
    render_csv, render_statement, statement_account_label, summarize, CsvExport, StatementDocument,
    StatementOptions, StatementSummary,
};
pub use filter::{filter_transactions, AccountFilter, TransactionFilter, TransactionQuery, TypeFilter};
pub use models::{Account, BankSnapshot, Beneficiary, Card, Transaction, User};
pub use reports::{dashboard_summary, transaction_analytics, AnalyticsWindow, DashboardSummary, TransactionAnalytics};
pub use session::{FileSnapshotSource, Session, SnapshotSource, SourceRef};
pub use types::{
    AccountStatus, AccountType, CardStatus, CardType, DepositMethod, TransactionType, WithdrawalMethod,
};
pub use validation::{validate_form, FieldError, FormKind};
