//! Running credit
//!
//! For every transaction of a tag, the amount consumed so far within the
//! transaction's period: the sum of the tag's transactions in the same bucket
//! up to and including this one, ordered by date and then insertion order.
//!
//! Transactions are sorted once and scanned once. Bucket keys never decrease
//! as dates increase, so each bucket is a contiguous run of the sorted list
//! and the running total only has to reset where the key changes.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::bucket::BucketKey;
use crate::error::LedgerResult;
use crate::models::{CreditType, Money, Tag, TagId, Transaction, TransactionId};

/// Credit consumed up to one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditUsage {
    pub transaction_id: TransactionId,
    /// Period the transaction counts against; `None` for a lifetime allowance
    pub bucket: Option<BucketKey>,
    /// Running sum within the period, this transaction included
    pub used: Money,
}

impl CreditUsage {
    /// Usage as a percentage of the allowance (`None` for a zero allowance)
    pub fn percent_of(&self, allowance: Money) -> Option<f64> {
        self.used.percent_of(allowance)
    }
}

/// Running credit of one tag across its transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningCredit {
    pub tag_id: TagId,
    /// Allowance per period; `None` for tags without credit
    pub allowance: Option<Money>,
    /// One entry per dated transaction, in (date, sort order) order
    pub entries: Vec<CreditUsage>,
    /// Transactions skipped because their date was missing or unparseable
    pub excluded: usize,
}

impl RunningCredit {
    fn empty(tag_id: TagId) -> Self {
        Self {
            tag_id,
            allowance: None,
            entries: Vec::new(),
            excluded: 0,
        }
    }

    /// Credit used up to a transaction
    pub fn used_for(&self, transaction_id: TransactionId) -> Option<Money> {
        self.entries
            .iter()
            .find(|e| e.transaction_id == transaction_id)
            .map(|e| e.used)
    }

    /// Transaction id to credit used
    pub fn as_map(&self) -> HashMap<TransactionId, Money> {
        self.entries
            .iter()
            .map(|e| (e.transaction_id, e.used))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes per-transaction running credit for a tag
pub struct RunningCreditCalculator;

impl RunningCreditCalculator {
    /// Compute the running credit of `tag` over `transactions`
    ///
    /// Transactions not associated with the tag are ignored. Tags without a
    /// credit type produce an empty result. Fails with a configuration error
    /// when the tag's start day is unusable or its allowance is missing.
    pub fn compute<'a, I>(tag: &Tag, transactions: I) -> LedgerResult<RunningCredit>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let rule = tag.period()?;
        if !tag.has_credit() {
            return Ok(RunningCredit::empty(tag.id));
        }
        let allowance = tag.required_allowance()?;
        let lifetime = tag.credit_type == CreditType::NoPeriod;

        let mut excluded = 0;
        let mut rows: Vec<_> = transactions
            .into_iter()
            .filter(|t| t.has_tag(tag.id))
            .filter_map(|t| match t.sort_key() {
                Some(key) => Some((key, t.amount)),
                None => {
                    excluded += 1;
                    None
                }
            })
            .collect();
        rows.sort_unstable_by_key(|(key, _)| *key);

        let mut entries = Vec::with_capacity(rows.len());
        let mut current: Option<Option<BucketKey>> = None;
        let mut used = Money::zero();
        for ((date, _, transaction_id), amount) in rows {
            let bucket = if lifetime { None } else { Some(rule.key(date)) };
            if current != Some(bucket) {
                current = Some(bucket);
                used = Money::zero();
            }
            used += amount;
            entries.push(CreditUsage {
                transaction_id,
                bucket,
                used,
            });
        }

        if excluded > 0 {
            warn!(tag = %tag.name, excluded, "skipped undated transactions");
        }
        debug!(tag = %tag.name, entries = entries.len(), "computed running credit");

        Ok(RunningCredit {
            tag_id: tag.id,
            allowance: Some(allowance),
            entries,
            excluded,
        })
    }
}
