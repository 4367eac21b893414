//! Statement export: CSV download and printable HTML statement
//!
//! Both renderers work on an already filtered transaction list and take the
//! generation time explicitly so output is reproducible.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tellerweb_config::StatementConfig;
use tellerweb_utils::{escape_html, money, signed_money};

use crate::error::ExportError;
use crate::filter::AccountFilter;
use crate::models::{Account, Transaction};

pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";
pub const HTML_MIME_TYPE: &str = "text/html;charset=utf-8";
pub const ALL_ACCOUNTS_LABEL: &str = "All Accounts";

const CSV_HEADERS: [&str; 8] = [
    "Date",
    "Reference",
    "Account",
    "Type",
    "Description",
    "Amount",
    "Balance After",
    "Status",
];

/// Rendering options taken from the `statement` config section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementOptions {
    pub bank_name: String,
    pub currency_symbol: String,
    /// chrono format for full timestamps
    pub datetime_format: String,
    /// chrono format for dates
    pub date_format: String,
}

impl Default for StatementOptions {
    fn default() -> Self {
        Self::from(&StatementConfig::default())
    }
}

impl From<&StatementConfig> for StatementOptions {
    fn from(config: &StatementConfig) -> Self {
        Self {
            bank_name: config.bank_name.clone(),
            currency_symbol: config.currency_symbol.clone(),
            datetime_format: config.datetime_format.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

/// Generated CSV file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

/// Generated printable statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementDocument {
    pub title: String,
    pub account_label: String,
    pub summary: StatementSummary,
    pub html: String,
}

/// Statement totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementSummary {
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub net: Decimal,
    pub transaction_count: usize,
}

impl StatementSummary {
    /// `+$120.00` when non-negative, `-$5.00` otherwise
    pub fn net_display(&self, symbol: &str) -> String {
        if self.net >= Decimal::ZERO {
            signed_money('+', symbol, self.net)
        } else {
            signed_money('-', symbol, self.net.abs())
        }
    }
}

/// Income and expense totals; internal transfers count toward neither
pub fn summarize(transactions: &[Transaction]) -> StatementSummary {
    let mut summary = StatementSummary {
        transaction_count: transactions.len(),
        ..Default::default()
    };
    for t in transactions {
        if t.transaction_type.is_credit() {
            summary.total_deposits += t.amount;
        } else if t.transaction_type.is_debit() {
            summary.total_withdrawals += t.amount;
        }
    }
    summary.net = summary.total_deposits - summary.total_withdrawals;
    summary
}

/// Label for the statement header
pub fn statement_account_label(accounts: &[Account], filter: AccountFilter) -> String {
    match filter {
        AccountFilter::All => ALL_ACCOUNTS_LABEL.to_string(),
        AccountFilter::Only(id) => accounts
            .iter()
            .find(|a| a.id == id)
            .map(Account::label)
            .unwrap_or_else(|| ALL_ACCOUNTS_LABEL.to_string()),
    }
}

fn amount_display(transaction: &Transaction, symbol: &str) -> String {
    signed_money(transaction.transaction_type.sign(), symbol, transaction.amount)
}

/// Quote a field only when it would break the row
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        csv_quoted(value)
    } else {
        value.to_string()
    }
}

fn csv_quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(transaction: &Transaction, options: &StatementOptions) -> String {
    let symbol = &options.currency_symbol;
    [
        csv_field(&transaction.created_at.format(&options.datetime_format).to_string()),
        csv_field(&transaction.transaction_reference),
        csv_field(&transaction.account_label()),
        csv_field(&transaction.transaction_type.label()),
        csv_quoted(&transaction.description),
        csv_field(&amount_display(transaction, symbol)),
        csv_field(&money(symbol, transaction.balance_after)),
        csv_field(&transaction.status),
    ]
    .join(",")
}

/// Render the CSV statement
///
/// Rows are joined with `\n` and the file has no trailing newline.
pub fn render_csv(
    transactions: &[Transaction],
    now: NaiveDateTime,
    options: &StatementOptions,
) -> Result<CsvExport, ExportError> {
    if transactions.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    lines.extend(transactions.iter().map(|t| csv_row(t, options)));

    Ok(CsvExport {
        file_name: format!("transaction_statement_{}.csv", now.format("%Y-%m-%d")),
        mime_type: CSV_MIME_TYPE.to_string(),
        content: lines.join("\n"),
    })
}

const STATEMENT_STYLE: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: 'Segoe UI', Arial, sans-serif; padding: 40px; color: #333; }
    .header { text-align: center; margin-bottom: 30px; padding-bottom: 20px; border-bottom: 2px solid #4f46e5; }
    .header h1 { color: #4f46e5; font-size: 28px; margin-bottom: 5px; }
    .header p { color: #666; font-size: 14px; }
    .meta { display: flex; justify-content: space-between; margin-bottom: 20px; padding: 15px; background: #f8f9fa; border-radius: 8px; }
    .meta-item { text-align: center; }
    .meta-item label { display: block; font-size: 12px; color: #666; margin-bottom: 4px; }
    .meta-item span { font-size: 16px; font-weight: 600; }
    .summary { display: flex; gap: 20px; margin-bottom: 30px; }
    .summary-card { flex: 1; padding: 15px; border-radius: 8px; text-align: center; }
    .summary-card.deposits { background: #dcfce7; }
    .summary-card.withdrawals { background: #fef3c7; }
    .summary-card.net { background: #e0e7ff; }
    .summary-card label { display: block; font-size: 12px; color: #666; margin-bottom: 4px; }
    .summary-card span { font-size: 20px; font-weight: 700; }
    table { width: 100%; border-collapse: collapse; margin-top: 20px; }
    th { background: #4f46e5; color: white; padding: 12px 8px; text-align: left; font-size: 12px; }
    td { padding: 10px 8px; border-bottom: 1px solid #eee; font-size: 12px; }
    tr:nth-child(even) { background: #f8f9fa; }
    .amount-positive { color: #16a34a; font-weight: 600; }
    .amount-negative { color: #d97706; font-weight: 600; }
    .footer { margin-top: 40px; text-align: center; color: #999; font-size: 11px; }
    @media print { body { padding: 20px; } }
"#;

fn statement_row(transaction: &Transaction, options: &StatementOptions) -> String {
    let class = if transaction.transaction_type.is_credit() {
        "amount-positive"
    } else {
        "amount-negative"
    };
    format!(
        r#"<tr><td>{}</td><td>{}</td><td>{} ****{}</td><td>{}</td><td>{}</td><td class="{}">{}</td><td>{}</td></tr>"#,
        transaction.created_at.format(&options.date_format),
        escape_html(&transaction.transaction_reference),
        transaction.account_type,
        escape_html(tellerweb_utils::last4(&transaction.account_number)),
        transaction.transaction_type.label(),
        escape_html(&transaction.description),
        class,
        escape_html(&amount_display(transaction, &options.currency_symbol)),
        escape_html(&money(&options.currency_symbol, transaction.balance_after)),
    )
}

/// Render the printable HTML statement
pub fn render_statement(
    transactions: &[Transaction],
    account_label: &str,
    now: NaiveDateTime,
    options: &StatementOptions,
) -> Result<StatementDocument, ExportError> {
    if transactions.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let summary = summarize(transactions);
    let symbol = &options.currency_symbol;
    let bank = escape_html(&options.bank_name);
    let title = format!("Transaction Statement - {}", options.bank_name);

    let rows: String = transactions
        .iter()
        .map(|t| statement_row(t, options))
        .collect();

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <div class="header"><h1>{bank}</h1><p>Transaction Statement</p></div>
    <div class="meta">
        <div class="meta-item"><label>Account</label><span>{account}</span></div>
        <div class="meta-item"><label>Statement Date</label><span>{date}</span></div>
        <div class="meta-item"><label>Total Transactions</label><span>{count}</span></div>
    </div>
    <div class="summary">
        <div class="summary-card deposits"><label>Total Income</label><span>{income}</span></div>
        <div class="summary-card withdrawals"><label>Total Expenses</label><span>{expenses}</span></div>
        <div class="summary-card net"><label>Net Change</label><span>{net}</span></div>
    </div>
    <table>
        <thead><tr><th>Date</th><th>Reference</th><th>Account</th><th>Type</th><th>Description</th><th>Amount</th><th>Balance</th></tr></thead>
        <tbody>{rows}</tbody>
    </table>
    <div class="footer">
        <p>This is a computer-generated statement from {bank}.</p>
        <p>Generated on {generated}</p>
    </div>
</body>
</html>"#,
        title = escape_html(&title),
        style = STATEMENT_STYLE,
        bank = bank,
        account = escape_html(account_label),
        date = now.format(&options.date_format),
        count = summary.transaction_count,
        income = escape_html(&signed_money('+', symbol, summary.total_deposits)),
        expenses = escape_html(&signed_money('-', symbol, summary.total_withdrawals)),
        net = escape_html(&summary.net_display(symbol)),
        rows = rows,
        generated = now.format(&options.datetime_format),
    );

    Ok(StatementDocument {
        title,
        account_label: account_label.to_string(),
        summary,
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountStatus, AccountType, TransactionType};
    use chrono::NaiveDate;
    use std::str::FromStr;
    use tellerweb_utils::fixed2;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    fn tx(transaction_type: TransactionType, amount: &str, description: &str) -> Transaction {
        Transaction {
            id: 1,
            account_id: 1,
            account_number: "1234567890".to_string(),
            account_type: AccountType::Checking,
            transaction_reference: "TXN001".to_string(),
            transaction_type,
            amount: Decimal::from_str(amount).unwrap(),
            balance_after: Decimal::from_str("1000").unwrap(),
            description: description.to_string(),
            status: "COMPLETED".to_string(),
            recipient_account_number: None,
            recipient_name: None,
            deposit_method: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_csv_amount_signs() {
        let transactions = vec![
            tx(TransactionType::Deposit, "100.5", "Salary"),
            tx(TransactionType::Withdrawal, "75", "ATM"),
        ];
        let export = render_csv(&transactions, now(), &StatementOptions::default()).unwrap();
        let lines: Vec<&str> = export.content.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Reference,Account,Type,Description,Amount,Balance After,Status");
        assert_eq!(
            lines[1],
            r#""1/15/2024, 10:30:00 AM",TXN001,CHECKING - ****7890,DEPOSIT,"Salary",+$100.50,$1000.00,COMPLETED"#
        );
        assert!(lines[2].contains(",-$75.00,"));
        assert!(!export.content.ends_with('\n'));
    }

    #[test]
    fn test_csv_file_metadata() {
        let transactions = vec![tx(TransactionType::Deposit, "1", "x")];
        let export = render_csv(&transactions, now(), &StatementOptions::default()).unwrap();
        assert_eq!(export.file_name, "transaction_statement_2024-02-01.csv");
        assert_eq!(export.mime_type, "text/csv;charset=utf-8");
    }

    #[test]
    fn test_csv_escapes_quotes_and_type_label() {
        let transactions = vec![tx(TransactionType::InternalTransfer, "5", r#"Move "rainy day" funds"#)];
        let export = render_csv(&transactions, now(), &StatementOptions::default()).unwrap();
        assert!(export.content.contains(r#","Move ""rainy day"" funds","#));
        assert!(export.content.contains(",INTERNAL TRANSFER,"));
        assert!(export.content.contains(",-$5.00,"));
    }

    #[test]
    fn test_negative_balance_matches_across_formats() {
        let mut overdrawn = tx(TransactionType::Withdrawal, "20", "Overdraft");
        overdrawn.balance_after = Decimal::from(-20);
        let transactions = vec![overdrawn];
        let options = StatementOptions::default();

        let export = render_csv(&transactions, now(), &options).unwrap();
        assert!(export.content.ends_with(",-$20.00,-$20.00,COMPLETED"));

        let document = render_statement(&transactions, "All Accounts", now(), &options).unwrap();
        assert!(document.html.contains("-$20.00"));
        assert!(!document.html.contains("$-20.00"));
    }

    #[test]
    fn test_empty_export_is_refused() {
        let options = StatementOptions::default();
        assert_eq!(render_csv(&[], now(), &options), Err(ExportError::NothingToExport));
        assert_eq!(
            render_statement(&[], ALL_ACCOUNTS_LABEL, now(), &options).unwrap_err(),
            ExportError::NothingToExport
        );
    }

    #[test]
    fn test_summarize() {
        let transactions = vec![
            tx(TransactionType::Deposit, "100", "a"),
            tx(TransactionType::TransferIn, "50", "b"),
            tx(TransactionType::Withdrawal, "30", "c"),
            tx(TransactionType::InternalTransfer, "999", "d"),
        ];
        let summary = summarize(&transactions);
        assert_eq!(fixed2(summary.total_deposits), "150.00");
        assert_eq!(fixed2(summary.total_withdrawals), "30.00");
        assert_eq!(summary.net_display("$"), "+$120.00");
        assert_eq!(summary.transaction_count, 4);
    }

    #[test]
    fn test_negative_net_display() {
        let summary = summarize(&[tx(TransactionType::TransferOut, "12.5", "rent")]);
        assert_eq!(summary.net_display("$"), "-$12.50");
    }

    #[test]
    fn test_statement_document() {
        let transactions = vec![
            tx(TransactionType::Deposit, "100", "Pay <bonus>"),
            tx(TransactionType::Withdrawal, "30", "Groceries"),
        ];
        let doc = render_statement(&transactions, "CHECKING - ****7890", now(), &StatementOptions::default()).unwrap();
        assert!(doc.html.starts_with("<!DOCTYPE html>"));
        assert!(doc.html.contains("<h1>Reuel Banking</h1>"));
        assert!(doc.html.contains("<span>CHECKING - ****7890</span>"));
        assert!(doc.html.contains("<span>2/1/2024</span>"));
        assert!(doc.html.contains("<span>+$100.00</span>"));
        assert!(doc.html.contains("<span>-$30.00</span>"));
        assert!(doc.html.contains("<span>+$70.00</span>"));
        assert!(doc.html.contains(r#"<td class="amount-positive">+$100.00</td>"#));
        assert!(doc.html.contains(r#"<td class="amount-negative">-$30.00</td>"#));
        assert!(doc.html.contains("Pay &lt;bonus&gt;"));
        assert!(doc.html.contains("Generated on 2/1/2024, 2:05:09 PM"));
        assert_eq!(doc.summary.transaction_count, 2);
    }

    #[test]
    fn test_statement_account_label() {
        let accounts = vec![Account {
            id: 3,
            account_number: "5550001234".to_string(),
            account_type: AccountType::Savings,
            currency: "USD".to_string(),
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
            created_at: None,
        }];
        assert_eq!(statement_account_label(&accounts, AccountFilter::All), "All Accounts");
        assert_eq!(statement_account_label(&accounts, AccountFilter::Only(3)), "SAVINGS - ****1234");
        assert_eq!(statement_account_label(&accounts, AccountFilter::Only(9)), "All Accounts");
    }
}
