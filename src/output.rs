//! Output formatting for babystat reports
//!
//! Two formatters behind one trait:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! The JSON output serializes the aggregation types directly, so its field
//! names follow the same binding contract as the library API
//! (`feeding.totalAmount`, `sleep.totalDuration`, `feedingAmount`, ...).

use crate::analyzer::AnalysisReport;
use babystat_core::aggregation_types::{DailyStats, DaySummary, PeriodSlice, PeriodTotals};
use babystat_core::types::Period;
use chrono::NaiveDate;
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::json;

/// Trait for report formatters
pub trait OutputFormatter {
    /// Format single-day statistics
    fn format_daily(&self, date: NaiveDate, stats: &DailyStats) -> String;

    /// Format a period series with its column totals
    fn format_period(&self, period: Period, slices: &[PeriodSlice], totals: &PeriodTotals)
    -> String;

    /// Format an analyzer report together with the summary it was based on
    fn format_advice(&self, date: NaiveDate, summary: &DaySummary, report: &AnalysisReport)
    -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new() -> Self {
        Self
    }

    /// Format milliliters without decimal noise
    fn format_ml(amount: f64) -> String {
        format!("{amount:.0} ml")
    }

    /// Format minutes as hours and minutes
    fn format_minutes(minutes: f64) -> String {
        let total = minutes.round() as i64;
        format!("{}h {:02}m", total / 60, total % 60)
    }

    /// Render an optional vital or a placeholder dash
    fn format_vital(value: Option<f64>, unit: &str) -> String {
        match value {
            Some(v) => format!("{v:.1} {unit}"),
            None => "-".to_string(),
        }
    }

    /// Color a flag by severity for terminal display
    fn colorize_flag(flag: &str) -> String {
        match flag {
            "ok" => flag.green().to_string(),
            "fever" | "low_weight" => flag.red().to_string(),
            _ => flag.yellow().to_string(),
        }
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_daily(&self, date: NaiveDate, stats: &DailyStats) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Category", b -> "Count", b -> "Total"]);

        table.add_row(row![
            "Feedings",
            stats.feeding.count,
            Self::format_ml(stats.feeding.total_amount)
        ]);
        table.add_row(row!["Wet diapers", stats.urine.count, "-"]);
        table.add_row(row!["Dirty diapers", stats.stool.count, "-"]);
        table.add_row(row![
            "Sleep",
            stats.sleep.count,
            Self::format_minutes(stats.sleep.total_duration)
        ]);

        format!("Daily statistics for {date}\n\n{table}")
    }

    fn format_period(
        &self,
        period: Period,
        slices: &[PeriodSlice],
        totals: &PeriodTotals,
    ) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![
            b -> "Date",
            b -> "Feedings",
            b -> "Amount",
            b -> "Diapers",
            b -> "Wet",
            b -> "Dirty",
            b -> "Sleep",
            b -> "Weight",
            b -> "Height",
            b -> "Temp"
        ]);

        for slice in slices {
            table.add_row(row![
                slice.label,
                slice.feeding,
                Self::format_ml(slice.feeding_amount),
                slice.diaper,
                slice.urine,
                slice.stool,
                Self::format_minutes(slice.sleep),
                Self::format_vital(slice.weight, "g"),
                Self::format_vital(slice.height, "cm"),
                Self::format_vital(slice.temperature, "°C")
            ]);
        }

        table.add_row(row![
            b -> "TOTAL",
            b -> totals.feeding,
            b -> Self::format_ml(totals.feeding_amount),
            b -> totals.diaper,
            b -> totals.urine,
            b -> totals.stool,
            b -> Self::format_minutes(totals.sleep),
            "",
            "",
            ""
        ]);

        format!("Per-{period} statistics, {} slices\n\n{table}", slices.len())
    }

    fn format_advice(
        &self,
        date: NaiveDate,
        summary: &DaySummary,
        report: &AnalysisReport,
    ) -> String {
        let mut out = format!(
            "Advice for {date}\n\nFeedings: {} ({}), sleep: {}, wet/dirty diapers: {}/{}\n",
            summary.total_feedings,
            Self::format_ml(summary.total_feeding_ml),
            Self::format_minutes(summary.total_sleep_minutes),
            summary.wet_diapers,
            summary.dirty_diapers,
        );
        if let Some(t) = summary.avg_temperature {
            out.push_str(&format!("Average temperature: {t:.1} °C\n"));
        }

        out.push('\n');
        for (flag, suggestion) in report.flags.iter().zip(report.suggestions.iter()) {
            out.push_str(&format!(
                "[{}] {}\n",
                Self::colorize_flag(flag),
                suggestion
            ));
        }
        out
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JsonFormatter
    pub fn new() -> Self {
        Self
    }

    fn to_pretty(value: serde_json::Value) -> String {
        serde_json::to_string_pretty(&value).expect("report types serialize without error")
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_daily(&self, date: NaiveDate, stats: &DailyStats) -> String {
        Self::to_pretty(json!({
            "date": date.to_string(),
            "stats": stats,
        }))
    }

    fn format_period(
        &self,
        period: Period,
        slices: &[PeriodSlice],
        totals: &PeriodTotals,
    ) -> String {
        Self::to_pretty(json!({
            "period": period.to_string(),
            "slices": slices,
            "totals": totals,
        }))
    }

    fn format_advice(
        &self,
        date: NaiveDate,
        summary: &DaySummary,
        report: &AnalysisReport,
    ) -> String {
        Self::to_pretty(json!({
            "date": date.to_string(),
            "summary": summary,
            "suggestions": report.suggestions,
            "flags": report.flags,
        }))
    }
}

/// Get the appropriate formatter for the output mode
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter::new())
    } else {
        Box::new(TableFormatter::new())
    }
}
