//! Per-tag time series for charting
//!
//! Sums a tag's transactions per bucket and returns the buckets in ascending
//! order.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::bucket::BucketKey;
use crate::error::LedgerResult;
use crate::models::{Money, Tag, TagId, Transaction};

/// One bucket of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub bucket: BucketKey,
    pub total: Money,
    /// Number of transactions summed into this bucket
    pub count: usize,
}

/// Bucketed totals of one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub tag_id: TagId,
    /// Ascending by bucket
    pub points: Vec<SeriesPoint>,
    /// Transactions skipped because their date was missing or unparseable
    pub excluded: usize,
}

impl Series {
    /// Sum over all buckets
    pub fn total(&self) -> Money {
        self.points.iter().map(|p| p.total).sum()
    }

    /// Number of transactions across all buckets
    pub fn count(&self) -> usize {
        self.points.iter().map(|p| p.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Builds bucketed series for tags
pub struct SeriesAggregator;

impl SeriesAggregator {
    /// Aggregate the transactions associated with `tag`
    ///
    /// Tags without a credit type have no series and yield an empty one.
    /// Fails with a configuration error when the tag's start day is unusable.
    pub fn aggregate<'a, I>(tag: &Tag, transactions: I) -> LedgerResult<Series>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let rule = tag.period()?;
        let mut series = Series {
            tag_id: tag.id,
            points: Vec::new(),
            excluded: 0,
        };
        if !tag.has_credit() {
            return Ok(series);
        }

        let mut buckets: BTreeMap<BucketKey, (Money, usize)> = BTreeMap::new();
        for txn in transactions.into_iter().filter(|t| t.has_tag(tag.id)) {
            let Some(date) = txn.date else {
                series.excluded += 1;
                continue;
            };
            let entry = buckets.entry(rule.key(date)).or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        }

        series.points = buckets
            .into_iter()
            .map(|(bucket, (total, count))| SeriesPoint {
                bucket,
                total,
                count,
            })
            .collect();

        if series.excluded > 0 {
            warn!(tag = %tag.name, excluded = series.excluded, "skipped undated transactions");
        }
        debug!(tag = %tag.name, buckets = series.points.len(), "aggregated series");

        Ok(series)
    }
}
