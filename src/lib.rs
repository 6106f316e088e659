//! tag-ledger - tag credit allowances and period reports for a personal ledger
//!
//! Transactions carry tags, and a tag may carry a credit allowance that
//! renews yearly, monthly (from any day of the month) or weekly (from any
//! weekday), or applies once for the tag's lifetime. This library computes,
//! from an immutable snapshot of the ledger, how much of each allowance every
//! transaction has used so far within its period, and the per-period totals
//! of each tag for charting.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Tags, transactions and the ledger snapshot
//! - `engine`: Bucketing, running credit and series aggregation
//! - `storage`: Snapshot documents on disk
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `tagledger` binary
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tag_ledger::engine::LedgerEngine;
//! use tag_ledger::models::{LedgerSnapshot, Money, Tag, Transaction};
//!
//! let dining = Tag::weekly("Dining", Money::from_cents(10000), 1);
//! let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
//! let lunch = Transaction::new(date, Money::from_cents(2500), 1).with_tag(&dining);
//! let snapshot = LedgerSnapshot::new(vec![dining.clone()], vec![lunch.clone()]);
//!
//! let credit = LedgerEngine::new(&snapshot).running_credit(dining.id)?;
//! assert_eq!(credit.used_for(lunch.id), Some(Money::from_cents(2500)));
//! # Ok::<(), tag_ledger::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
