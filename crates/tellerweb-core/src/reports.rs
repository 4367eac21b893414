//! Dashboard and analytics structures for API responses

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tellerweb_config::DashboardConfig;

use crate::accounts::total_balance;
use crate::models::{Account, BankSnapshot, Transaction};
use crate::types::TransactionType;

/// Dashboard overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_balance: Decimal,
    pub accounts: Vec<Account>,
    pub recent_transactions: Vec<Transaction>,
    pub total_accounts: usize,
    pub total_transactions: usize,
}

/// Build the dashboard overview; `recent` caps the recent transaction list
pub fn dashboard_summary(snapshot: &BankSnapshot, recent: usize) -> DashboardSummary {
    DashboardSummary {
        total_balance: total_balance(&snapshot.accounts),
        accounts: snapshot.accounts.clone(),
        recent_transactions: recent_transactions(&snapshot.transactions, recent),
        total_accounts: snapshot.accounts.len(),
        total_transactions: snapshot.transactions.len(),
    }
}

/// Newest first; ties keep input order
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.into_iter().take(limit).cloned().collect()
}

/// Analytics window sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsWindow {
    pub months: u32,
    pub days: u32,
}

impl Default for AnalyticsWindow {
    fn default() -> Self {
        Self { months: 6, days: 30 }
    }
}

impl From<&DashboardConfig> for AnalyticsWindow {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            months: config.analytics_months,
            days: config.analytics_days,
        }
    }
}

/// Deposits and withdrawals per calendar month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    pub labels: Vec<String>,
    pub deposits: Vec<Decimal>,
    pub withdrawals: Vec<Decimal>,
}

/// Transaction counts by type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDistribution {
    pub deposits: usize,
    pub withdrawals: usize,
    pub transfers_out: usize,
    pub transfers_in: usize,
}

/// Income minus expenses per day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCashFlow {
    pub labels: Vec<String>,
    pub net_flow: Vec<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAnalytics {
    pub monthly_data: MonthlyData,
    pub type_distribution: TypeDistribution,
    pub daily_cash_flow: DailyCashFlow,
}

/// (income, expenses) of the transactions accepted by `in_bucket`
fn flows<F>(transactions: &[Transaction], in_bucket: F) -> (Decimal, Decimal)
where
    F: Fn(&NaiveDateTime) -> bool,
{
    transactions
        .iter()
        .filter(|t| in_bucket(&t.created_at))
        .fold((Decimal::ZERO, Decimal::ZERO), |(income, expenses), t| {
            if t.transaction_type.is_credit() {
                (income + t.amount, expenses)
            } else if t.transaction_type.is_debit() {
                (income, expenses + t.amount)
            } else {
                (income, expenses)
            }
        })
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn monthly_data(transactions: &[Transaction], now: NaiveDateTime, months: u32) -> MonthlyData {
    let current = month_start(now.date());
    let mut data = MonthlyData::default();

    for back in (0..months).rev() {
        let Some(start) = current.checked_sub_months(Months::new(back)) else {
            continue;
        };
        let (income, expenses) = flows(transactions, |at| {
            at.year() == start.year() && at.month() == start.month()
        });
        data.labels.push(start.format("%b %Y").to_string());
        data.deposits.push(income);
        data.withdrawals.push(expenses);
    }
    data
}

pub fn type_distribution(transactions: &[Transaction]) -> TypeDistribution {
    let mut distribution = TypeDistribution::default();
    for t in transactions {
        match t.transaction_type {
            TransactionType::Deposit => distribution.deposits += 1,
            TransactionType::Withdrawal => distribution.withdrawals += 1,
            TransactionType::TransferOut => distribution.transfers_out += 1,
            TransactionType::TransferIn => distribution.transfers_in += 1,
            TransactionType::InternalTransfer => {}
        }
    }
    distribution
}

pub fn daily_cash_flow(transactions: &[Transaction], now: NaiveDateTime, days: u32) -> DailyCashFlow {
    let today = now.date();
    let mut flow = DailyCashFlow::default();

    for back in (0..days).rev() {
        let Some(day) = today.checked_sub_signed(Duration::days(i64::from(back))) else {
            continue;
        };
        let (income, expenses) = flows(transactions, |at| at.date() == day);
        flow.labels.push(day.format("%b %-d").to_string());
        flow.net_flow.push(income - expenses);
    }
    flow
}

/// Monthly totals, type counts and daily net flow ending at `now`
pub fn transaction_analytics(
    transactions: &[Transaction],
    now: NaiveDateTime,
    window: AnalyticsWindow,
) -> TransactionAnalytics {
    TransactionAnalytics {
        monthly_data: monthly_data(transactions, now, window.months),
        type_distribution: type_distribution(transactions),
        daily_cash_flow: daily_cash_flow(transactions, now, window.days),
    }
}
