//! Aggregation data types for babystat
//!
//! Pure data structures produced by the aggregation engine. Serialized field
//! names are a binding contract: the app's summary and chart views index
//! these fields directly without existence checks, so counts and sums are
//! always present (zero-floored) and only the vitals fields are optional.

use crate::types::DailyDate;
use serde::{Deserialize, Serialize};

/// Feeding totals for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingTotals {
    /// Number of feeding events
    pub count: u32,
    /// Total consumed volume in milliliters
    pub total_amount: f64,
}

/// Count of diaper events with a given sub-flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaperCount {
    pub count: u32,
}

/// Sleep totals for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepTotals {
    /// Number of sleep sessions
    pub count: u32,
    /// Total slept minutes
    pub total_duration: f64,
}

/// Fixed-shape statistics for a single calendar day
///
/// Every field group is present on every value, including the one computed
/// from an empty activity list; `DailyStats::default()` is the zero floor.
///
/// # Examples
/// ```
/// use babystat_core::aggregation_types::DailyStats;
///
/// let empty = DailyStats::default();
/// assert_eq!(empty.feeding.count, 0);
/// assert_eq!(empty.sleep.total_duration, 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    /// Feeding events and total volume
    pub feeding: FeedingTotals,
    /// Diaper events flagged wet
    pub urine: DiaperCount,
    /// Diaper events flagged dirty
    pub stool: DiaperCount,
    /// Sleep sessions and total minutes
    pub sleep: SleepTotals,
}

/// One element of a period series
///
/// Counts and cumulative quantities are zero-floored; the vitals are genuinely
/// optional and stay `None` when no measurement fell into the slice. Each
/// vital independently carries the latest measured value (by activity
/// timestamp) within the slice, never a sum or average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSlice {
    /// Anchor day and month, no year (e.g. `03/01`)
    pub label: String,
    /// Slice anchor date
    pub date: DailyDate,
    /// Feeding event count
    pub feeding: u32,
    /// Total feeding volume in milliliters
    pub feeding_amount: f64,
    /// Total diaper events (each change counted once, wet, dirty, or both)
    pub diaper: u32,
    /// Diaper events flagged wet
    pub urine: u32,
    /// Diaper events flagged dirty
    pub stool: u32,
    /// Total slept minutes
    pub sleep: f64,
    /// Latest measured weight in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Latest measured height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Latest measured temperature in Celsius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Column totals over a period series
///
/// Sums the additive columns only; vitals are point-in-time values and have
/// no meaningful total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub feeding: u32,
    pub feeding_amount: f64,
    pub diaper: u32,
    pub urine: u32,
    pub stool: u32,
    pub sleep: f64,
}

impl PeriodTotals {
    pub fn from_slices(slices: &[PeriodSlice]) -> Self {
        let mut totals = Self::default();
        for slice in slices {
            totals.feeding += slice.feeding;
            totals.feeding_amount += slice.feeding_amount;
            totals.diaper += slice.diaper;
            totals.urine += slice.urine;
            totals.stool += slice.stool;
            totals.sleep += slice.sleep;
        }
        totals
    }
}

/// Single-day summary consumed by the heuristic analyzer
///
/// A superset of [`DailyStats`]: the same counts flattened, plus the day's
/// average measured temperature and latest weight/height.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    /// Number of feeding events
    pub total_feedings: u32,
    /// Total feeding volume in milliliters
    pub total_feeding_ml: f64,
    /// Diaper events flagged wet
    pub wet_diapers: u32,
    /// Diaper events flagged dirty
    pub dirty_diapers: u32,
    /// Total slept minutes
    pub total_sleep_minutes: f64,
    /// Mean of the day's temperature readings in Celsius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_temperature: Option<f64>,
    /// Latest measured weight in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Latest measured height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl From<&DailyStats> for DaySummary {
    fn from(stats: &DailyStats) -> Self {
        Self {
            total_feedings: stats.feeding.count,
            total_feeding_ml: stats.feeding.total_amount,
            wet_diapers: stats.urine.count,
            dirty_diapers: stats.stool.count,
            total_sleep_minutes: stats.sleep.total_duration,
            avg_temperature: None,
            weight: None,
            height: None,
        }
    }
}
