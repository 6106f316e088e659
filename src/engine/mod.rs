//! Aggregation engine
//!
//! Pure computations over a [`LedgerSnapshot`]: calendar bucketing, running
//! credit per transaction, and per-tag series. Nothing here performs I/O or
//! keeps state between calls; callers re-run the engine on a fresh snapshot
//! whenever the ledger changes.

pub mod bucket;
pub mod credit;
pub mod series;

pub use bucket::{bucket_key, BucketKey, BucketRule};
pub use credit::{CreditUsage, RunningCredit, RunningCreditCalculator};
pub use series::{Series, SeriesAggregator, SeriesPoint};

use std::collections::HashMap;
use tracing::warn;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{LedgerSnapshot, Money, TagId, Transaction, TransactionId};

/// Credit state of one tag on one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCredit {
    pub tag_id: TagId,
    pub used: Money,
    pub allowance: Money,
}

/// A transaction with the running credit of each of its tags
#[derive(Debug, Clone)]
pub struct AnnotatedTransaction<'a> {
    pub transaction: &'a Transaction,
    /// One entry per associated tag that tracks credit
    pub credits: Vec<TagCredit>,
}

impl AnnotatedTransaction<'_> {
    pub fn credit_for(&self, tag_id: TagId) -> Option<&TagCredit> {
        self.credits.iter().find(|c| c.tag_id == tag_id)
    }
}

/// Income and expense totals over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    pub count: usize,
}

impl LedgerSummary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = Self::default();
        for txn in transactions {
            if txn.is_inflow() {
                summary.income += txn.amount;
            } else {
                summary.expenses += txn.amount;
            }
            summary.net += txn.amount;
            summary.count += 1;
        }
        summary
    }
}

/// Stateless entry point over a borrowed snapshot
pub struct LedgerEngine<'a> {
    snapshot: &'a LedgerSnapshot,
}

impl<'a> LedgerEngine<'a> {
    pub fn new(snapshot: &'a LedgerSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &'a LedgerSnapshot {
        self.snapshot
    }

    /// Series of one tag
    pub fn series(&self, tag_id: TagId) -> LedgerResult<Series> {
        let tag = self
            .snapshot
            .tag(tag_id)
            .ok_or_else(|| LedgerError::tag_not_found(tag_id.to_string()))?;
        SeriesAggregator::aggregate(tag, self.snapshot.transactions())
    }

    /// Running credit of one tag
    pub fn running_credit(&self, tag_id: TagId) -> LedgerResult<RunningCredit> {
        let tag = self
            .snapshot
            .tag(tag_id)
            .ok_or_else(|| LedgerError::tag_not_found(tag_id.to_string()))?;
        RunningCreditCalculator::compute(tag, self.snapshot.transactions())
    }

    /// Series of every tag; a misconfigured tag only fails its own entry
    pub fn series_for_all_tags(&self) -> Vec<(TagId, LedgerResult<Series>)> {
        self.snapshot
            .tags()
            .iter()
            .map(|tag| {
                let result = SeriesAggregator::aggregate(tag, self.snapshot.transactions());
                if let Err(e) = &result {
                    warn!(tag = %tag.name, error = %e, "series unavailable");
                }
                (tag.id, result)
            })
            .collect()
    }

    /// Running credit of every tag; a misconfigured tag only fails its own entry
    pub fn credit_for_all_tags(&self) -> Vec<(TagId, LedgerResult<RunningCredit>)> {
        self.snapshot
            .tags()
            .iter()
            .map(|tag| {
                let result = RunningCreditCalculator::compute(tag, self.snapshot.transactions());
                if let Err(e) = &result {
                    warn!(tag = %tag.name, error = %e, "running credit unavailable");
                }
                (tag.id, result)
            })
            .collect()
    }

    /// Transactions newest first, each with the running credit of its tags
    ///
    /// Tags whose credit cannot be computed are left out of the annotations.
    pub fn annotate(&self) -> Vec<AnnotatedTransaction<'a>> {
        let mut by_transaction: HashMap<TransactionId, Vec<TagCredit>> = HashMap::new();
        for (tag_id, result) in self.credit_for_all_tags() {
            let Ok(credit) = result else { continue };
            let Some(allowance) = credit.allowance else {
                continue;
            };
            for entry in credit.entries {
                by_transaction
                    .entry(entry.transaction_id)
                    .or_default()
                    .push(TagCredit {
                        tag_id,
                        used: entry.used,
                        allowance,
                    });
            }
        }

        self.snapshot
            .newest_first()
            .into_iter()
            .map(|transaction| {
                let mut credits = by_transaction.remove(&transaction.id).unwrap_or_default();
                // Follow the transaction's own tag order
                credits.sort_by_key(|c| {
                    transaction
                        .tags
                        .iter()
                        .position(|t| t.id == c.tag_id)
                        .unwrap_or(usize::MAX)
                });
                AnnotatedTransaction {
                    transaction,
                    credits,
                }
            })
            .collect()
    }

    /// Totals over the whole snapshot
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_transactions(self.snapshot.transactions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreditType, Tag};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> (LedgerSnapshot, Tag, Tag, Tag) {
        let weekly = Tag::weekly("A", Money::from_cents(20000), 1);
        let broken = Tag::new("C").with_credit(CreditType::Monthly, Some(Money::zero()), None);
        let plain = Tag::new("Misc");
        let txns = vec![
            Transaction::new(date(2024, 1, 1), Money::from_cents(10000), 1)
                .with_tag(&weekly)
                .with_tag(&plain),
            Transaction::new(date(2024, 1, 3), Money::from_cents(5000), 2)
                .with_tag(&weekly)
                .with_tag(&broken),
            Transaction::new(date(2024, 1, 8), Money::from_cents(3000), 3).with_tag(&weekly),
            Transaction::new(date(2024, 1, 9), Money::from_cents(-2500), 4),
        ];
        let snapshot = LedgerSnapshot::new(
            vec![weekly.clone(), broken.clone(), plain.clone()],
            txns,
        );
        (snapshot, weekly, broken, plain)
    }

    #[test]
    fn test_series_and_credit_by_id() {
        let (snapshot, weekly, _, _) = sample();
        let engine = LedgerEngine::new(&snapshot);

        let series = engine.series(weekly.id).unwrap();
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.total(), Money::from_cents(18000));

        let credit = engine.running_credit(weekly.id).unwrap();
        let used: Vec<i64> = credit.entries.iter().map(|e| e.used.cents()).collect();
        assert_eq!(used, vec![10000, 15000, 3000]);
    }

    #[test]
    fn test_unknown_tag() {
        let (snapshot, _, _, _) = sample();
        let engine = LedgerEngine::new(&snapshot);
        assert!(engine.series(TagId::new()).unwrap_err().is_not_found());
        assert!(engine.running_credit(TagId::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_batch_isolates_configuration_errors() {
        let (snapshot, weekly, broken, plain) = sample();
        let engine = LedgerEngine::new(&snapshot);

        let results = engine.credit_for_all_tags();
        assert_eq!(results.len(), 3);
        for (tag_id, result) in &results {
            if *tag_id == broken.id {
                assert!(result.as_ref().unwrap_err().is_configuration());
            } else if *tag_id == weekly.id {
                assert_eq!(result.as_ref().unwrap().entries.len(), 3);
            } else {
                assert_eq!(*tag_id, plain.id);
                assert!(result.as_ref().unwrap().is_empty());
            }
        }

        let series = engine.series_for_all_tags();
        assert_eq!(series.iter().filter(|(_, r)| r.is_err()).count(), 1);
    }

    #[test]
    fn test_annotate() {
        let (snapshot, weekly, _, _) = sample();
        let engine = LedgerEngine::new(&snapshot);

        let rows = engine.annotate();
        assert_eq!(rows.len(), 4);

        // Newest first
        assert_eq!(rows[0].transaction.date, Some(date(2024, 1, 9)));
        assert!(rows[0].credits.is_empty());

        let t2 = &rows[2];
        assert_eq!(t2.transaction.date, Some(date(2024, 1, 3)));
        assert_eq!(t2.credits.len(), 1);
        let credit = t2.credit_for(weekly.id).unwrap();
        assert_eq!(credit.used, Money::from_cents(15000));
        assert_eq!(credit.allowance, Money::from_cents(20000));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let (snapshot, weekly, _, _) = sample();
        let engine = LedgerEngine::new(&snapshot);
        assert_eq!(engine.series(weekly.id).unwrap(), engine.series(weekly.id).unwrap());
        assert_eq!(
            engine.running_credit(weekly.id).unwrap(),
            engine.running_credit(weekly.id).unwrap()
        );
    }

    #[test]
    fn test_last_running_credit_in_each_bucket_matches_series_total() {
        let rows = [
            (Some(date(2023, 12, 30)), -1500, 1),
            (Some(date(2024, 1, 1)), 4000, 2),
            (Some(date(2024, 1, 1)), -250, 3),
            (Some(date(2024, 1, 1)), 900, 3),
            (Some(date(2024, 1, 16)), 1200, 4),
            (Some(date(2024, 1, 31)), -700, 5),
            (Some(date(2024, 2, 15)), 3300, 6),
            (Some(date(2024, 2, 29)), 10, 7),
            (Some(date(2024, 3, 1)), 4500, 8),
            (None, 99999, 9),
        ];
        let dated_total: i64 = rows.iter().filter(|r| r.0.is_some()).map(|r| r.1).sum();

        let allowance = Money::from_cents(10000);
        let mut tags: Vec<Tag> = (1..=30).map(|d| Tag::monthly("M", allowance, d)).collect();
        tags.extend((0..=6).map(|d| Tag::weekly("W", allowance, d)));
        tags.push(Tag::yearly("Y", allowance));

        for tag in tags {
            let txns: Vec<Transaction> = rows
                .iter()
                .map(|&(day, cents, order)| {
                    let mut txn = Transaction::new(
                        day.unwrap_or(date(2024, 1, 1)),
                        Money::from_cents(cents),
                        order,
                    )
                    .with_tag(&tag);
                    txn.date = day;
                    txn
                })
                .collect();
            let snapshot = LedgerSnapshot::new(vec![tag.clone()], txns);
            let engine = LedgerEngine::new(&snapshot);
            let series = engine.series(tag.id).unwrap();
            let credit = engine.running_credit(tag.id).unwrap();

            // The start day moves rows between buckets but never changes the totals
            assert_eq!(series.excluded, 1);
            assert_eq!(credit.excluded, 1);
            assert_eq!(series.count(), 9);
            assert_eq!(series.total(), Money::from_cents(dated_total));
            assert_eq!(credit.entries.len(), 9);

            for point in &series.points {
                let in_bucket: Vec<&CreditUsage> = credit
                    .entries
                    .iter()
                    .filter(|e| e.bucket == Some(point.bucket))
                    .collect();
                assert_eq!(in_bucket.len(), point.count, "{:?}", point.bucket);
                assert_eq!(
                    in_bucket.last().unwrap().used,
                    point.total,
                    "{:?} {:?}",
                    tag.credit_label(),
                    point.bucket
                );
            }
        }
    }

    #[test]
    fn test_summary() {
        let (snapshot, _, _, _) = sample();
        let summary = LedgerEngine::new(&snapshot).summary();
        assert_eq!(summary.income, Money::from_cents(18000));
        assert_eq!(summary.expenses, Money::from_cents(-2500));
        assert_eq!(summary.net, Money::from_cents(15500));
        assert_eq!(summary.count, 4);
    }
}
