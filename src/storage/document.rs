//! On-disk snapshot document
//!
//! Flat rows as the ledger store exports them: tags, transactions and the
//! association pairs between them. Transaction dates are kept as text until
//! the rows are converted, so a bad date only affects its own row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{LedgerSnapshot, Money, Tag, Transaction, TransactionId, TransactionTag};

/// A transaction row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    #[serde(default)]
    pub date: Option<String>,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl TransactionRecord {
    /// Convert to a transaction; `position` stands in for a missing sort order
    fn into_transaction(self, position: usize) -> Transaction {
        let date = self.date.as_deref().and_then(parse_date);
        if date.is_none() {
            debug!(
                id = %self.id,
                date = self.date.as_deref().unwrap_or(""),
                "transaction has no usable date"
            );
        }
        Transaction {
            id: self.id,
            date,
            amount: self.amount,
            description: self.description,
            sort_order: self.sort_order.unwrap_or(position as i64 + 1),
            tags: Vec::new(),
        }
    }
}

/// Whole snapshot document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub transaction_tags: Vec<TransactionTag>,
}

impl SnapshotDocument {
    /// Resolve the rows into a snapshot
    pub fn into_snapshot(self) -> LedgerSnapshot {
        let transactions = self
            .transactions
            .into_iter()
            .enumerate()
            .map(|(i, record)| record.into_transaction(i))
            .collect();
        let snapshot = LedgerSnapshot::from_parts(self.tags, transactions, &self.transaction_tags);
        if snapshot.dangling_links() > 0 {
            warn!(
                count = snapshot.dangling_links(),
                "skipped tag links to missing records"
            );
        }
        snapshot
    }
}

/// Parse a stored date
///
/// Accepts `YYYY-MM-DD` and ISO datetimes such as `2022-01-22T10:11:12.000Z`,
/// whose calendar date is taken as written.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    match text.as_bytes().get(10) {
        Some(b'T') | Some(b' ') => text
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-08"), Some(date(2024, 1, 8)));
        assert_eq!(parse_date("2022-01-22T10:11:12.000Z"), Some(date(2022, 1, 22)));
        assert_eq!(parse_date("2022-01-22 23:59:59"), Some(date(2022, 1, 22)));
        assert_eq!(parse_date(" 2024-02-29 "), Some(date(2024, 2, 29)));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_records_convert_with_defaults() {
        let json = r#"{
            "tags": [],
            "transactions": [
                {"id": "550e8400-e29b-41d4-a716-446655440001", "date": "2024-01-01", "amount": 100},
                {"id": "550e8400-e29b-41d4-a716-446655440002", "date": "garbage", "amount": 200},
                {"id": "550e8400-e29b-41d4-a716-446655440003", "amount": 300, "sort_order": 42}
            ]
        }"#;
        let doc: SnapshotDocument = serde_json::from_str(json).unwrap();
        let snapshot = doc.into_snapshot();
        let txns = snapshot.transactions();

        assert_eq!(txns[0].date, Some(date(2024, 1, 1)));
        assert_eq!(txns[0].sort_order, 1);
        assert_eq!(txns[1].date, None);
        assert_eq!(txns[1].sort_order, 2);
        assert_eq!(txns[2].date, None);
        assert_eq!(txns[2].sort_order, 42);
    }

    #[test]
    fn test_amounts_are_decimal_units() {
        let json = r#"{
            "tags": [
                {"id": "550e8400-e29b-41d4-a716-4466554400a1", "name": "Food",
                 "credit_type": "Monthly", "credit_amount": 200.75, "start_day": 1}
            ],
            "transactions": [
                {"id": "550e8400-e29b-41d4-a716-446655440001", "date": "2024-01-01", "amount": 12.5},
                {"id": "550e8400-e29b-41d4-a716-446655440002", "date": "2024-01-02", "amount": -40},
                {"id": "550e8400-e29b-41d4-a716-446655440003", "date": "2024-01-03", "amount": "19.99"}
            ]
        }"#;
        let doc: SnapshotDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.tags[0].credit_amount, Some(Money::from_cents(20075)));

        let snapshot = doc.into_snapshot();
        let cents: Vec<i64> = snapshot
            .transactions()
            .iter()
            .map(|t| t.amount.cents())
            .collect();
        assert_eq!(cents, vec![1250, -4000, 1999]);
    }

    #[test]
    fn test_bad_amount_is_a_load_error() {
        let json = r#"{"transactions": [
            {"id": "550e8400-e29b-41d4-a716-446655440001", "date": "2024-01-01", "amount": "lots"}
        ]}"#;
        let err = serde_json::from_str::<SnapshotDocument>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid money format"));
    }
}
