//! Tag model
//!
//! Tags categorise transactions. A tag may carry a credit allowance that
//! renews every period (yearly, monthly, weekly) or applies once for the
//! tag's whole lifetime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use super::ids::TagId;
use super::money::Money;
use crate::engine::bucket::BucketRule;
use crate::error::{LedgerError, LedgerResult};

/// Valid `start_day` values for monthly tags (day of month)
pub const MONTHLY_START_DAYS: RangeInclusive<u32> = 1..=30;

/// Valid `start_day` values for weekly tags (0 = Sunday .. 6 = Saturday)
pub const WEEKLY_START_DAYS: RangeInclusive<u32> = 0..=6;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Name of a weekday index as used by weekly tags (0 = Sunday)
pub fn weekday_name(index: u32) -> Option<&'static str> {
    WEEKDAY_NAMES.get(index as usize).copied()
}

/// How a tag's credit allowance renews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CreditType {
    /// No allowance; the tag is a plain label
    #[default]
    None,
    /// One allowance for the tag's whole lifetime
    NoPeriod,
    /// Renews every calendar year
    Yearly,
    /// Renews every month on `start_day`
    Monthly,
    /// Renews every week on weekday `start_day`
    Weekly,
}

impl CreditType {
    /// Check a `start_day` against this credit type
    ///
    /// Monthly and weekly tags must carry an in-range start day. Other types
    /// ignore it here; the `None` type's stricter rule lives in [`Tag::validate`].
    pub fn check_start_day(&self, start_day: Option<u32>) -> LedgerResult<()> {
        let range = match self {
            Self::Monthly => MONTHLY_START_DAYS,
            Self::Weekly => WEEKLY_START_DAYS,
            _ => return Ok(()),
        };

        match start_day {
            None => Err(LedgerError::Configuration(format!(
                "{} credit requires a start day",
                self
            ))),
            Some(day) if !range.contains(&day) => Err(LedgerError::Configuration(format!(
                "{} start day {} is out of range {}..={}",
                self,
                day,
                range.start(),
                range.end()
            ))),
            Some(_) => Ok(()),
        }
    }
}

impl fmt::Display for CreditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::NoPeriod => write!(f, "NoPeriod"),
            Self::Yearly => write!(f, "Yearly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Weekly => write!(f, "Weekly"),
        }
    }
}

/// A categorical tag, optionally carrying a recurring credit allowance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: TagId,

    /// Display name
    pub name: String,

    /// Icon reference ("library/icon"), display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// How the credit allowance renews
    #[serde(default)]
    pub credit_type: CreditType,

    /// Allowance per period
    #[serde(default)]
    pub credit_amount: Option<Money>,

    /// Period offset: day of month (monthly) or weekday index (weekly)
    #[serde(default)]
    pub start_day: Option<u32>,
}

impl Tag {
    /// Create a plain tag with no credit allowance
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TagId::new(),
            name: name.into(),
            icon: None,
            credit_type: CreditType::None,
            credit_amount: None,
            start_day: None,
        }
    }

    /// Attach a credit allowance
    pub fn with_credit(
        mut self,
        credit_type: CreditType,
        credit_amount: Option<Money>,
        start_day: Option<u32>,
    ) -> Self {
        self.credit_type = credit_type;
        self.credit_amount = credit_amount;
        self.start_day = start_day;
        self
    }

    /// Create a tag with a monthly allowance renewing on `start_day`
    pub fn monthly(name: impl Into<String>, amount: Money, start_day: u32) -> Self {
        Self::new(name).with_credit(CreditType::Monthly, Some(amount), Some(start_day))
    }

    /// Create a tag with a weekly allowance renewing on weekday `start_day`
    pub fn weekly(name: impl Into<String>, amount: Money, start_day: u32) -> Self {
        Self::new(name).with_credit(CreditType::Weekly, Some(amount), Some(start_day))
    }

    /// Create a tag with a yearly allowance
    pub fn yearly(name: impl Into<String>, amount: Money) -> Self {
        Self::new(name).with_credit(CreditType::Yearly, Some(amount), None)
    }

    /// Create a tag with a one-time allowance
    pub fn fixed(name: impl Into<String>, amount: Money) -> Self {
        Self::new(name).with_credit(CreditType::NoPeriod, Some(amount), None)
    }

    /// Whether this tag tracks an allowance at all
    pub fn has_credit(&self) -> bool {
        self.credit_type != CreditType::None
    }

    /// Validate the credit configuration
    ///
    /// A `None` tag must not carry an amount or start day; monthly and weekly
    /// tags need an in-range start day.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.credit_type == CreditType::None {
            if self.credit_amount.is_some() || self.start_day.is_some() {
                return Err(LedgerError::Configuration(format!(
                    "tag '{}' has no credit type but carries credit settings",
                    self.name
                )));
            }
            return Ok(());
        }

        self.credit_type
            .check_start_day(self.start_day)
            .map_err(|e| match e {
                LedgerError::Configuration(msg) => {
                    LedgerError::Configuration(format!("tag '{}': {}", self.name, msg))
                }
                other => other,
            })
    }

    /// The validated bucketing rule for this tag's credit settings
    pub fn period(&self) -> LedgerResult<BucketRule> {
        self.validate()?;
        BucketRule::resolve(self.credit_type, self.start_day)
    }

    /// The allowance, required for credit tracking
    pub fn required_allowance(&self) -> LedgerResult<Money> {
        self.credit_amount.ok_or_else(|| {
            LedgerError::Configuration(format!(
                "tag '{}' has {} credit but no credit amount",
                self.name, self.credit_type
            ))
        })
    }

    /// Human-readable credit summary, e.g. "Credit: $200.00 (Monthly, Start: 16)"
    pub fn credit_label(&self) -> Option<String> {
        let detail = match self.credit_type {
            CreditType::None => return None,
            CreditType::NoPeriod => "Fixed".to_string(),
            CreditType::Yearly => "Yearly".to_string(),
            CreditType::Monthly => match self.start_day {
                Some(day) => format!("Monthly, Start: {}", day),
                None => "Monthly".to_string(),
            },
            CreditType::Weekly => match self.start_day.and_then(weekday_name) {
                Some(day) => format!("Weekly, Start: {}", day),
                None => "Weekly".to_string(),
            },
        };
        let amount = self.credit_amount.unwrap_or_default();
        Some(format!("Credit: {} ({})", amount, detail))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
