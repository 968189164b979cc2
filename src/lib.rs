//! babystat - Daily and period statistics over exported baby-activity logs
//!
//! This library provides functionality to:
//! - Parse activity exports (JSONL or JSON) into a typed activity model,
//!   normalizing legacy type-tag aliases along the way
//! - Compute fixed-shape daily statistics and day/week/month period series
//! - Run a heuristic rule table over a day's summary to produce flags and
//!   suggestions
//! - Render reports as tables or JSON
//!
//! # Examples
//!
//! ```no_run
//! use babystat::{
//!     aggregation::Aggregator,
//!     data_loader::DataLoader,
//!     timezone::TimezoneConfig,
//! };
//! use chrono::NaiveDate;
//!
//! fn main() -> babystat::Result<()> {
//!     let loader = DataLoader::new(None)?;
//!     let activities = loader.load_activities()?;
//!
//!     let aggregator = Aggregator::new(TimezoneConfig::default());
//!     let stats = aggregator.daily_stats(
//!         &activities,
//!         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     );
//!     println!("{} feedings", stats.feeding.count);
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod analyzer;
pub mod cli;
pub mod data_loader;
pub mod output;

// Re-export the core crate's modules and commonly used types
pub use babystat_core::{aggregation_types, error, filters, timezone, types};
pub use babystat_core::{
    Activity, ActivityCategory, ActivityId, ActivityKind, BabyId, BabystatError, DailyDate,
    ISOTimestamp, Period, Result,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
