//! Ledger snapshot
//!
//! An immutable view of the ledger at one moment: the tag catalogue plus all
//! transactions with their tag copies already resolved. Every aggregation
//! runs against a snapshot, so repeated calls over the same snapshot produce
//! identical results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ids::{TagId, TransactionId};
use super::tag::Tag;
use super::transaction::Transaction;

/// A many-to-many association row between a transaction and a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionTag {
    pub transaction_id: TransactionId,
    pub tag_id: TagId,
}

impl TransactionTag {
    pub fn new(transaction_id: TransactionId, tag_id: TagId) -> Self {
        Self {
            transaction_id,
            tag_id,
        }
    }
}

/// Read-only ledger contents handed to the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    tags: Vec<Tag>,
    transactions: Vec<Transaction>,
    dangling_links: usize,
}

impl LedgerSnapshot {
    /// Build a snapshot from transactions that already carry their tags
    pub fn new(tags: Vec<Tag>, transactions: Vec<Transaction>) -> Self {
        Self {
            tags,
            transactions,
            dangling_links: 0,
        }
    }

    /// Build a snapshot from flat store rows
    ///
    /// Each link attaches a copy of its tag to its transaction. Links that
    /// name an unknown transaction or tag are skipped and counted in
    /// [`dangling_links`](Self::dangling_links).
    pub fn from_parts(
        tags: Vec<Tag>,
        mut transactions: Vec<Transaction>,
        links: &[TransactionTag],
    ) -> Self {
        let tag_index: HashMap<TagId, usize> =
            tags.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let txn_index: HashMap<TransactionId, usize> = transactions
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i))
            .collect();

        let mut dangling_links = 0;
        for link in links {
            match (
                txn_index.get(&link.transaction_id),
                tag_index.get(&link.tag_id),
            ) {
                (Some(&ti), Some(&gi)) => {
                    let txn = &mut transactions[ti];
                    if !txn.has_tag(link.tag_id) {
                        txn.tags.push(tags[gi].clone());
                    }
                }
                _ => dangling_links += 1,
            }
        }

        Self {
            tags,
            transactions,
            dangling_links,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of association rows that referenced a missing record
    pub fn dangling_links(&self) -> usize {
        self.dangling_links
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Look up a tag by id
    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Look up a tag by name (case-insensitive)
    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Find a tag by name, full id, or short display id ("tag-1a2b3c4d")
    pub fn find_tag(&self, identifier: &str) -> Option<&Tag> {
        if let Some(tag) = self.tag_by_name(identifier) {
            return Some(tag);
        }
        if let Ok(id) = identifier.parse::<TagId>() {
            return self.tag(id);
        }
        self.tags.iter().find(|t| t.id.to_string() == identifier)
    }

    /// Transactions associated with a tag, in storage order
    pub fn tagged_with(&self, tag_id: TagId) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.has_tag(tag_id))
            .collect()
    }

    /// Transactions newest first: date descending, then insertion order
    /// descending, undated rows last
    pub fn newest_first(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| match (a.date, b.date) {
            (Some(da), Some(db)) => db.cmp(&da).then(b.sort_order.cmp(&a.sort_order)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.sort_order.cmp(&a.sort_order),
        });
        sorted
    }
}
