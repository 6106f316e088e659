//! Core data models for tag-ledger
//!
//! This module contains the data structures the aggregation engine reads:
//! tags with their credit settings, transactions, and the snapshot that ties
//! them together.

pub mod ids;
pub mod money;
pub mod snapshot;
pub mod tag;
pub mod transaction;

pub use ids::{TagId, TransactionId};
pub use money::Money;
pub use snapshot::{LedgerSnapshot, TransactionTag};
pub use tag::{CreditType, Tag};
pub use transaction::Transaction;
