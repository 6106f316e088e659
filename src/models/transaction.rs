//! Transaction model
//!
//! A dated, signed amount carrying resolved copies of the tags it is
//! associated with. Transactions are read-only snapshots of the ledger
//! store's rows; the aggregation engine never mutates them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{TagId, TransactionId};
use super::money::Money;
use super::tag::Tag;

/// A ledger transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Calendar date; `None` when the stored date was missing or unparseable
    pub date: Option<NaiveDate>,

    /// Amount (positive for income, negative for expense)
    pub amount: Money,

    /// Free-form description, display only
    #[serde(default)]
    pub description: String,

    /// Insertion order, the tie-break between transactions on the same date
    pub sort_order: i64,

    /// Resolved copies of the associated tags
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Transaction {
    /// Create a new untagged transaction
    pub fn new(date: NaiveDate, amount: Money, sort_order: i64) -> Self {
        Self {
            id: TransactionId::new(),
            date: Some(date),
            amount,
            description: String::new(),
            sort_order,
            tags: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Associate a tag (a copy of it is stored)
    pub fn with_tag(mut self, tag: &Tag) -> Self {
        if !self.has_tag(tag.id) {
            self.tags.push(tag.clone());
        }
        self
    }

    /// Check whether this transaction is associated with a tag
    pub fn has_tag(&self, tag_id: TagId) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    /// Get the associated copy of a tag
    pub fn tag(&self, tag_id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == tag_id)
    }

    /// Ordering key within a period: date first, then insertion order
    ///
    /// The id breaks exact ties so the order is total. Undated
    /// transactions have no key.
    pub fn sort_key(&self) -> Option<(NaiveDate, i64, TransactionId)> {
        self.date.map(|date| (date, self.sort_order, self.id))
    }

    /// Check if this is income (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an expense (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "????-??-??".to_string());
        write!(f, "{} {} {}", date, self.description, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(date(2025, 1, 15), Money::from_cents(-5000), 3);
        assert_eq!(txn.date, Some(date(2025, 1, 15)));
        assert_eq!(txn.sort_order, 3);
        assert!(txn.is_outflow());
        assert!(!txn.is_inflow());
        assert!(txn.tags.is_empty());
    }

    #[test]
    fn test_tagging_is_idempotent() {
        let tag = Tag::new("Food");
        let txn = Transaction::new(date(2025, 1, 15), Money::from_cents(100), 1)
            .with_tag(&tag)
            .with_tag(&tag);
        assert_eq!(txn.tags.len(), 1);
        assert!(txn.has_tag(tag.id));
        assert_eq!(txn.tag(tag.id).map(|t| t.name.as_str()), Some("Food"));
    }

    #[test]
    fn test_sort_key_orders_by_date_then_sort_order() {
        let a = Transaction::new(date(2025, 1, 15), Money::zero(), 9);
        let b = Transaction::new(date(2025, 1, 16), Money::zero(), 1);
        let c = Transaction::new(date(2025, 1, 16), Money::zero(), 2);
        assert!(a.sort_key() < b.sort_key());
        assert!(b.sort_key() < c.sort_key());

        let mut undated = a.clone();
        undated.date = None;
        assert_eq!(undated.sort_key(), None);
    }

    #[test]
    fn test_display() {
        let txn = Transaction::new(date(2025, 1, 15), Money::from_cents(-5000), 1)
            .with_description("Groceries");
        assert_eq!(format!("{}", txn), "2025-01-15 Groceries -$50.00");
    }
}
