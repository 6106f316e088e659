//! Calendar bucketing
//!
//! Maps a transaction date to the period it belongs to under a tag's credit
//! settings. Monthly periods may start on any day of the month and weekly
//! periods on any weekday; the key of a period is always derived from the
//! date alone, so bucketing needs no state.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::LedgerResult;
use crate::models::CreditType;

/// Weekdays indexed the way weekly tags store `start_day` (0 = Sunday)
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Identifier of the period a transaction is aggregated into
///
/// Keys produced by one rule always share a variant, so the derived ordering
/// is chronological: years and `YYYYMM` months compare numerically, week
/// starts and days compare as dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    /// Calendar year
    Year(i32),
    /// `year * 100 + month`, after any start-day shift
    Month(i32),
    /// First day of the week
    Week(NaiveDate),
    /// A single calendar day
    Day(NaiveDate),
}

impl BucketKey {
    /// The year part of the key
    pub fn year(&self) -> i32 {
        match self {
            Self::Year(y) => *y,
            Self::Month(ym) => ym.div_euclid(100),
            Self::Week(d) | Self::Day(d) => d.year(),
        }
    }

    /// Integer form for year and month keys
    pub fn as_number(&self) -> Option<i32> {
        match self {
            Self::Year(n) | Self::Month(n) => Some(*n),
            Self::Week(_) | Self::Day(_) => None,
        }
    }

    /// Date form for week and day keys
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Week(d) | Self::Day(d) => Some(*d),
            Self::Year(_) | Self::Month(_) => None,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(n) | Self::Month(n) => write!(f, "{}", n),
            Self::Week(d) | Self::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

// Year and month keys serialize as integers, week and day keys as ISO dates.
impl Serialize for BucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Year(n) | Self::Month(n) => serializer.serialize_i32(*n),
            Self::Week(_) | Self::Day(_) => serializer.collect_str(self),
        }
    }
}

/// A validated bucketing rule derived from a tag's credit settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketRule {
    /// One bucket per calendar day
    Day,
    /// One bucket per calendar year
    Year,
    /// Months beginning on `start_day`
    Month { start_day: u32 },
    /// Weeks beginning on `start`
    Week { start: Weekday },
}

impl BucketRule {
    /// Resolve the rule for a credit type and start day
    ///
    /// Fails with a configuration error when a monthly or weekly type lacks
    /// an in-range start day. `None` and `NoPeriod` bucket per day.
    pub fn resolve(credit_type: CreditType, start_day: Option<u32>) -> LedgerResult<Self> {
        credit_type.check_start_day(start_day)?;

        Ok(match (credit_type, start_day) {
            (CreditType::Yearly, _) => Self::Year,
            (CreditType::Monthly, Some(day)) => Self::Month { start_day: day },
            (CreditType::Weekly, Some(day)) => Self::Week {
                start: WEEKDAYS[day as usize],
            },
            _ => Self::Day,
        })
    }

    /// Bucket a date. Total for every valid rule.
    ///
    /// A week starting before `NaiveDate::MIN` is keyed by `NaiveDate::MIN`
    /// itself, so only those first few days get a week key that does not
    /// fall on the start weekday.
    pub fn key(&self, date: NaiveDate) -> BucketKey {
        match *self {
            Self::Day => BucketKey::Day(date),
            Self::Year => BucketKey::Year(date.year()),
            Self::Month { start_day } => {
                let (mut year, mut month) = (date.year(), date.month() as i32);
                if date.day() < start_day {
                    month -= 1;
                    if month == 0 {
                        month = 12;
                        year -= 1;
                    }
                }
                BucketKey::Month(year * 100 + month)
            }
            Self::Week { start } => {
                let back = (date.weekday().num_days_from_sunday() + 7
                    - start.num_days_from_sunday())
                    % 7;
                let week_start = date
                    .checked_sub_days(Days::new(u64::from(back)))
                    .unwrap_or(NaiveDate::MIN);
                BucketKey::Week(week_start)
            }
        }
    }
}

/// Bucket a date under a credit type and start day
pub fn bucket_key(
    date: NaiveDate,
    credit_type: CreditType,
    start_day: Option<u32>,
) -> LedgerResult<BucketKey> {
    Ok(BucketRule::resolve(credit_type, start_day)?.key(date))
}
