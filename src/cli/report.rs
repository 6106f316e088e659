//! CLI commands for reports
//!
//! The per-tag series and the transaction register with running credit.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use super::CliContext;
use crate::display::{
    chart_points, excluded_warning, format_credit_register, format_series_report, ChartPoint,
    CreditDisplay,
};
use crate::engine::{LedgerEngine, LedgerSummary};
use crate::error::{LedgerError, LedgerResult};

/// Arguments of the `series` command
#[derive(Args, Debug)]
pub struct SeriesArgs {
    /// Tag name or ID (every tag when omitted)
    pub tag: Option<String>,

    /// Print `[{bucket, total}]` JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments of the `credits` command
#[derive(Args, Debug)]
pub struct CreditsArgs {
    /// Show credit as used/allowance amounts
    #[arg(long)]
    pub amount: bool,

    /// Show credit as a percentage of the allowance
    #[arg(long)]
    pub percent: bool,

    /// Only transactions carrying this tag (name or ID)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Only transactions on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,

    /// Number of transactions to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// One tag's entry in the all-tags JSON output
#[derive(Serialize)]
struct TagSeriesJson<'a> {
    tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<Vec<ChartPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excluded: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Parse a date given on the command line
fn parse_date_arg(value: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Data(format!("Invalid date '{}', expected YYYY-MM-DD", value))
    })
}

/// Print the series of one tag, or of every tag
///
/// With a single tag a configuration error fails the command. Across all
/// tags each failure is reported in place and the rest still print.
pub fn handle_series_command(ctx: &CliContext, args: SeriesArgs) -> LedgerResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let engine = LedgerEngine::new(&snapshot);
    let symbol = &ctx.settings.currency_symbol;

    if let Some(identifier) = args.tag {
        let tag = snapshot
            .find_tag(&identifier)
            .ok_or_else(|| LedgerError::tag_not_found(&identifier))?;
        let series = engine.series(tag.id)?;

        if args.json {
            // stdout stays a plain point array; the skipped count goes to stderr
            if let Some(warning) = excluded_warning(series.excluded) {
                eprintln!("{}", warning);
            }
            println!("{}", serde_json::to_string_pretty(&chart_points(&series))?);
        } else {
            print!("{}", format_series_report(tag, &series, symbol));
        }
        return Ok(());
    }

    let results = engine.series_for_all_tags();
    if args.json {
        let entries: Vec<TagSeriesJson> = results
            .iter()
            .filter_map(|(tag_id, result)| {
                let tag = snapshot.tag(*tag_id)?;
                Some(TagSeriesJson {
                    tag: &tag.name,
                    series: result.as_ref().ok().map(chart_points),
                    excluded: result
                        .as_ref()
                        .ok()
                        .map(|s| s.excluded)
                        .filter(|n| *n > 0),
                    error: result.as_ref().err().map(|e| e.to_string()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No tags found.");
    }
    for (i, (tag_id, result)) in results.iter().enumerate() {
        let Some(tag) = snapshot.tag(*tag_id) else {
            continue;
        };
        if i > 0 {
            println!();
        }
        match result {
            Ok(series) => print!("{}", format_series_report(tag, series, symbol)),
            Err(e) => println!("Series: {}\nError: {}", tag.name, e),
        }
    }

    Ok(())
}

/// Print the register with each tag's running credit
pub fn handle_credits_command(ctx: &CliContext, args: CreditsArgs) -> LedgerResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let engine = LedgerEngine::new(&snapshot);

    let display = if args.amount || args.percent {
        CreditDisplay {
            amount: args.amount,
            percent: args.percent,
        }
    } else {
        CreditDisplay::from_settings(&ctx.settings)
    };

    let since = args.since.as_deref().map(parse_date_arg).transpose()?;

    // Credits are computed over the whole ledger before any filtering
    let mut rows = engine.annotate();
    if let Some(identifier) = &args.tag {
        let tag = snapshot
            .find_tag(identifier)
            .ok_or_else(|| LedgerError::tag_not_found(identifier))?;
        rows.retain(|r| r.transaction.has_tag(tag.id));
    }
    if let Some(since) = since {
        rows.retain(|r| r.transaction.date.is_some_and(|d| d >= since));
    }
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    let summary = LedgerSummary::from_transactions(rows.iter().map(|r| r.transaction));
    print!(
        "{}",
        format_credit_register(
            &rows,
            &summary,
            display,
            &ctx.settings.date_format,
            &ctx.settings.currency_symbol
        )
    );
    if display.is_hidden() {
        println!("Credit display is off; pass --amount or --percent to show it.");
    }

    Ok(())
}
