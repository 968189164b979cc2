//! CLI interface for babystat
//!
//! Defines the command-line interface using clap. Three reports are exposed:
//! `daily` for one day's fixed-shape statistics, `period` for a day/week/month
//! series over a range, and `advice` for the heuristic analyzer's take on a
//! single day.
//!
//! # Example
//!
//! ```bash
//! # Today's statistics from the default data directory
//! babystat daily
//!
//! # Weekly series for March 2024, as JSON
//! babystat period --period week --since 2024-03-01 --until 2024-03-31 --json
//!
//! # Advice for a specific day, grouping dates in Seoul time
//! babystat advice --date 2024-03-01 --timezone Asia/Seoul
//! ```

use babystat_core::error::{BabystatError, Result};
use babystat_core::types::Period;
use chrono::{Days, Months, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Daily and period statistics over exported baby-activity logs
#[derive(Parser, Debug, Clone)]
#[command(name = "babystat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to an export file or directory (default: platform data directory)
    #[arg(long, short = 'f', global = true, env = "BABYSTAT_DATA_PATH")]
    pub data_path: Option<PathBuf>,

    /// Only include activities for this child
    #[arg(long, short = 'b', global = true)]
    pub baby: Option<String>,

    /// Timezone for date grouping (e.g. "America/New_York", "Asia/Seoul", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC for date grouping (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Only print warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available reports
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show statistics for a single day
    Daily {
        /// Target date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show a series of day, week, or month slices
    Period {
        /// Slice granularity: day, week, or month
        #[arg(long, short = 'p', default_value = "day")]
        period: String,

        /// First slice anchor (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,

        /// Last anchor date, inclusive (YYYY-MM-DD, default: today)
        #[arg(long)]
        until: Option<String>,
    },
    /// Run the heuristic analyzer over one day
    Advice {
        /// Target date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| BabystatError::InvalidDate(input.to_string()))
}

/// Parse a period granularity argument
pub fn parse_period_arg(input: &str) -> Result<Period> {
    input.parse().map_err(BabystatError::InvalidPeriod)
}

/// Default date range for a period report ending today
///
/// A week of days, eight weeks, or six months: enough context for the
/// terminal without scrolling.
pub fn default_period_range(period: Period, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let since = match period {
        Period::Day => today.checked_sub_days(Days::new(6)),
        Period::Week => today.checked_sub_days(Days::new(49)),
        Period::Month => today.checked_sub_months(Months::new(5)),
    };
    (since.unwrap_or(today), today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg("2024-03-01").unwrap(), date(2024, 3, 1));
        assert!(matches!(
            parse_date_arg("03/01/2024"),
            Err(BabystatError::InvalidDate(_))
        ));
        assert!(parse_date_arg("2024-13-01").is_err());
    }

    #[test]
    fn test_parse_period_arg() {
        assert_eq!(parse_period_arg("week").unwrap(), Period::Week);
        assert!(matches!(
            parse_period_arg("fortnight"),
            Err(BabystatError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn test_default_period_ranges() {
        let today = date(2024, 3, 15);
        assert_eq!(
            default_period_range(Period::Day, today),
            (date(2024, 3, 9), today)
        );
        assert_eq!(
            default_period_range(Period::Week, today),
            (date(2024, 1, 26), today)
        );
        assert_eq!(
            default_period_range(Period::Month, today),
            (date(2023, 10, 15), today)
        );
    }

    #[test]
    fn test_cli_parses_period_command() {
        let cli = Cli::try_parse_from([
            "babystat", "period", "--period", "week", "--since", "2024-03-01", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Period { period, since, .. } => {
                assert_eq!(period, "week");
                assert_eq!(since.as_deref(), Some("2024-03-01"));
            }
            _ => panic!("expected period command"),
        }
    }
}
