//! Tag display formatting
//!
//! Tag catalogue tables and the per-tag credit text shown next to
//! transactions.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::format_percentage;
use crate::config::Settings;
use crate::engine::TagCredit;
use crate::models::tag::weekday_name;
use crate::models::{CreditType, Tag};

/// Which credit figures to show next to a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreditDisplay {
    pub amount: bool,
    pub percent: bool,
}

impl CreditDisplay {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            amount: settings.show_credit_amount,
            percent: settings.show_credit_percent,
        }
    }

    pub fn is_hidden(&self) -> bool {
        !self.amount && !self.percent
    }
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    name: String,
    #[tabled(rename = "Credit")]
    credit_type: CreditType,
    #[tabled(rename = "Allowance")]
    allowance: String,
    #[tabled(rename = "Starts")]
    start: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn start_text(tag: &Tag) -> String {
    match (tag.credit_type, tag.start_day) {
        (CreditType::Monthly, Some(day)) => format!("day {}", day),
        (CreditType::Weekly, Some(day)) => weekday_name(day)
            .map(str::to_string)
            .unwrap_or_else(|| format!("day {}?", day)),
        (CreditType::Monthly | CreditType::Weekly, None) => "missing".to_string(),
        _ => "-".to_string(),
    }
}

/// Format the tag catalogue as a table
pub fn format_tag_table(tags: &[Tag], currency_symbol: &str) -> String {
    if tags.is_empty() {
        return "No tags found.\n".to_string();
    }

    let rows = tags.iter().map(|tag| TagRow {
        name: tag.name.clone(),
        credit_type: tag.credit_type,
        allowance: tag
            .credit_amount
            .map(|a| a.format_with_symbol(currency_symbol))
            .unwrap_or_else(|| "-".to_string()),
        start: start_text(tag),
        id: tag.id.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format a tag's credit next to a transaction
///
/// "Food (150.00/200.00)", "Food (75%)", both joined with a comma, or the
/// bare name when credit display is off.
pub fn format_tag_credit(name: &str, credit: Option<&TagCredit>, display: CreditDisplay) -> String {
    let Some(credit) = credit else {
        return name.to_string();
    };

    let mut parts = Vec::new();
    if display.amount {
        parts.push(format!(
            "{}/{}",
            credit.used.format_plain(),
            credit.allowance.format_plain()
        ));
    }
    if display.percent {
        // A zero allowance has no meaningful share
        if let Some(pct) = credit.used.percent_of(credit.allowance) {
            parts.push(format_percentage(pct));
        }
    }

    if parts.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, parts.join(", "))
    }
}
