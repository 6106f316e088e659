//! Series report formatting for terminal output

use crate::engine::{BucketKey, Series};
use crate::models::Tag;

/// Human label of a bucket ("2024", "2024/03", "2024-01-08")
pub fn bucket_label(bucket: &BucketKey) -> String {
    match bucket {
        BucketKey::Year(year) => year.to_string(),
        BucketKey::Month(ym) => format!("{}/{:02}", ym.div_euclid(100), ym.rem_euclid(100)),
        BucketKey::Week(d) | BucketKey::Day(d) => d.format("%Y-%m-%d").to_string(),
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a tag's series as a bucket table with magnitude bars
pub fn format_series_report(tag: &Tag, series: &Series, currency_symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Series: {} ({})\n", tag.name, tag.credit_type));
    if let Some(label) = tag.credit_label() {
        output.push_str(&format!("{}\n", label));
    }
    output.push('\n');

    if series.is_empty() {
        output.push_str("No data for this tag.\n");
    } else {
        let max = series
            .points
            .iter()
            .map(|p| p.total.abs().as_f64())
            .fold(0.0_f64, f64::max);

        output.push_str(&format!(
            "{:<12} {:>14} {:>6}  {}\n",
            "Period", "Total", "Count", "Chart"
        ));
        output.push_str(&separator(58));
        output.push('\n');

        for point in &series.points {
            output.push_str(&format!(
                "{:<12} {:>14} {:>6}  {}\n",
                bucket_label(&point.bucket),
                point.total.format_with_symbol(currency_symbol),
                point.count,
                format_bar(point.total.abs().as_f64(), max, 20)
            ));
        }

        output.push_str(&separator(58));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>14} {:>6}\n",
            "Total",
            series.total().format_with_symbol(currency_symbol),
            series.count()
        ));
    }

    if let Some(warning) = excluded_warning(series.excluded) {
        output.push_str(&format!("\n{}\n", warning));
    }

    output
}

/// Warning line for transactions skipped for lack of a date
pub fn excluded_warning(excluded: usize) -> Option<String> {
    (excluded > 0).then(|| {
        format!(
            "Warning: {} transaction(s) without a valid date were skipped.",
            excluded
        )
    })
}

/// A series point in the charting output shape
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartPoint {
    pub bucket: BucketKey,
    pub total: f64,
}

/// Series as `[{bucket, total}]` for charting
pub fn chart_points(series: &Series) -> Vec<ChartPoint> {
    series
        .points
        .iter()
        .map(|p| ChartPoint {
            bucket: p.bucket,
            total: p.total.as_f64(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{SeriesAggregator, SeriesPoint};
    use crate::models::{Money, TagId, Transaction};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(bucket_label(&BucketKey::Year(2024)), "2024");
        assert_eq!(bucket_label(&BucketKey::Month(202403)), "2024/03");
        assert_eq!(bucket_label(&BucketKey::Month(202312)), "2023/12");
        assert_eq!(bucket_label(&BucketKey::Week(date(2024, 1, 8))), "2024-01-08");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_series_report() {
        let tag = Tag::monthly("Food", Money::from_cents(50000), 16);
        let txns = vec![
            Transaction::new(date(2024, 1, 10), Money::from_cents(4000), 1).with_tag(&tag),
            Transaction::new(date(2024, 1, 20), Money::from_cents(6000), 2).with_tag(&tag),
        ];
        let series = SeriesAggregator::aggregate(&tag, &txns).unwrap();

        let report = format_series_report(&tag, &series, "$");
        assert!(report.contains("Series: Food (Monthly)"));
        assert!(report.contains("2023/12"));
        assert!(report.contains("2024/01"));
        assert!(report.contains("$100.00"));
        assert!(!report.contains("Warning"));
    }

    #[test]
    fn test_empty_series_report_mentions_skipped_rows() {
        let tag = Tag::yearly("Travel", Money::zero());
        let series = Series {
            tag_id: TagId::new(),
            points: Vec::new(),
            excluded: 2,
        };
        let report = format_series_report(&tag, &series, "$");
        assert!(report.contains("No data"));
        assert!(report.contains("2 transaction(s)"));
    }

    #[test]
    fn test_excluded_warning() {
        assert_eq!(excluded_warning(0), None);
        assert!(excluded_warning(3).unwrap().contains("3 transaction(s)"));
    }

    #[test]
    fn test_chart_points_json() {
        let series = Series {
            tag_id: TagId::new(),
            points: vec![SeriesPoint {
                bucket: BucketKey::Month(202401),
                total: Money::from_cents(15050),
                count: 3,
            }],
            excluded: 0,
        };
        let json = serde_json::to_string(&chart_points(&series)).unwrap();
        assert_eq!(json, r#"[{"bucket":202401,"total":150.5}]"#);
    }
}
