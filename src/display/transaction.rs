//! Transaction list formatting
//!
//! The register view: transactions newest first, each tag followed by its
//! running credit, with an income/expense footer.

use std::fmt::Write;

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::tag::{format_tag_credit, CreditDisplay};
use crate::engine::{AnnotatedTransaction, LedgerSummary};

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

/// Truncate a string to a maximum number of characters with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a date, falling back to ISO when `date_format` is not valid strftime
fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

fn row(
    annotated: &AnnotatedTransaction<'_>,
    display: CreditDisplay,
    date_format: &str,
    currency_symbol: &str,
) -> RegisterRow {
    let txn = annotated.transaction;
    let tags = txn
        .tags
        .iter()
        .map(|tag| format_tag_credit(&tag.name, annotated.credit_for(tag.id), display))
        .collect::<Vec<_>>()
        .join(", ");

    RegisterRow {
        date: txn
            .date
            .map(|d| format_date(d, date_format))
            .unwrap_or_else(|| "(no date)".to_string()),
        description: truncate(&txn.description, 30),
        amount: txn.amount.format_with_symbol(currency_symbol),
        tags,
    }
}

/// Format the register with per-tag running credit
pub fn format_credit_register(
    rows: &[AnnotatedTransaction<'_>],
    summary: &LedgerSummary,
    display: CreditDisplay,
    date_format: &str,
    currency_symbol: &str,
) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let table_rows = rows
        .iter()
        .map(|r| row(r, display, date_format, currency_symbol));
    let mut table = Table::new(table_rows);
    table.with(Style::psql());

    format!(
        "{}\n\nIncome: {}  Expenses: {}  Net: {}  ({} transactions)\n",
        table,
        summary.income.format_with_symbol(currency_symbol),
        summary.expenses.format_with_symbol(currency_symbol),
        summary.net.format_with_symbol(currency_symbol),
        summary.count
    )
}
