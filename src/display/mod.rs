//! Display formatting for terminal output
//!
//! Turns engine results into tables and text. Bucket labels and credit text
//! are produced here; the engine itself only returns keys and amounts.

pub mod report;
pub mod tag;
pub mod transaction;

pub use report::{bucket_label, chart_points, excluded_warning, format_series_report, ChartPoint};
pub use tag::{format_tag_credit, format_tag_table, CreditDisplay};
pub use transaction::format_credit_register;
