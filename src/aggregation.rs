//! Aggregation engine for activity records
//!
//! This module turns a raw, unordered collection of activities into the
//! fixed-shape summaries the rest of the system consumes: per-day statistics
//! ([`DailyStats`]), period series ([`PeriodSlice`]), and the analyzer's
//! single-day summary ([`DaySummary`]).
//!
//! All methods are pure functions of their arguments plus the configured
//! grouping timezone: no I/O, no shared state, fresh output on every call.
//! Input ordering is never relied upon; membership is re-checked per record
//! against the target day or slice.
//!
//! # Date-window semantics
//!
//! Day and month slices test **calendar-component equality** of the activity's
//! local date against the anchor. Week slices instead test the local wall
//! clock against the instant range `[anchor 00:00, anchor+6d 00:00]`, both
//! ends inclusive. The two styles disagree at the week boundary: an activity
//! late on the seventh day matches no week slice. Each policy lives behind
//! its own predicate; none of them may be unified without changing observed
//! results.
//!
//! # Examples
//!
//! ```
//! use babystat::aggregation::Aggregator;
//! use babystat::timezone::TimezoneConfig;
//! use babystat::types::{Activity, ActivityKind};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let aggregator = Aggregator::new(TimezoneConfig::resolve(None, true).unwrap());
//! let activities = vec![Activity::new(
//!     "a-1",
//!     "baby-01",
//!     Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
//!     ActivityKind::Feeding { amount_ml: 120.0 },
//! )];
//!
//! let stats = aggregator.daily_stats(&activities, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
//! assert_eq!(stats.feeding.count, 1);
//! assert_eq!(stats.feeding.total_amount, 120.0);
//! ```

use babystat_core::aggregation_types::{DailyStats, DaySummary, PeriodSlice};
use babystat_core::error::{BabystatError, Result};
use babystat_core::filters::PeriodFilter;
use babystat_core::timezone::TimezoneConfig;
use babystat_core::types::{Activity, ActivityKind, DailyDate, ISOTimestamp, Period};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Upper bound on the number of slices one period series may generate
///
/// A filter whose range would exceed this is rejected with
/// [`BabystatError::RangeTooLarge`] rather than silently truncated.
pub const MAX_PERIOD_SLICES: usize = 500;

/// Accumulator for one day of activities
#[derive(Default)]
struct DayAccumulator {
    stats: DailyStats,
}

impl DayAccumulator {
    fn add(&mut self, kind: &ActivityKind) {
        match kind {
            ActivityKind::Feeding { amount_ml } => {
                self.stats.feeding.count += 1;
                self.stats.feeding.total_amount += amount_ml;
            }
            ActivityKind::Sleep { duration_min } => {
                self.stats.sleep.count += 1;
                self.stats.sleep.total_duration += duration_min;
            }
            ActivityKind::Diaper { urine, stool } => {
                // one change may increment both
                if *urine {
                    self.stats.urine.count += 1;
                }
                if *stool {
                    self.stats.stool.count += 1;
                }
            }
            _ => {}
        }
    }

    fn into_stats(self) -> DailyStats {
        self.stats
    }
}

/// Accumulator for one period slice
#[derive(Default)]
struct SliceAccumulator {
    feeding: u32,
    feeding_amount: f64,
    diaper: u32,
    urine: u32,
    stool: u32,
    sleep: f64,
    weight: Option<(ISOTimestamp, f64)>,
    height: Option<(ISOTimestamp, f64)>,
    temperature: Option<(ISOTimestamp, f64)>,
}

impl SliceAccumulator {
    fn add(&mut self, activity: &Activity) {
        match &activity.kind {
            ActivityKind::Feeding { amount_ml } => {
                self.feeding += 1;
                self.feeding_amount += amount_ml;
            }
            ActivityKind::Sleep { duration_min } => {
                self.sleep += duration_min;
            }
            ActivityKind::Diaper { urine, stool } => {
                self.diaper += 1;
                if *urine {
                    self.urine += 1;
                }
                if *stool {
                    self.stool += 1;
                }
            }
            ActivityKind::Measurement {
                weight_g,
                height_cm,
                temperature_c,
            } => {
                record_latest(&mut self.weight, activity.timestamp, *weight_g);
                record_latest(&mut self.height, activity.timestamp, *height_cm);
                record_latest(&mut self.temperature, activity.timestamp, *temperature_c);
            }
            _ => {}
        }
    }

    fn into_slice(self, anchor: NaiveDate) -> PeriodSlice {
        PeriodSlice {
            label: anchor.format("%m/%d").to_string(),
            date: DailyDate::new(anchor),
            feeding: self.feeding,
            feeding_amount: self.feeding_amount,
            diaper: self.diaper,
            urine: self.urine,
            stool: self.stool,
            sleep: self.sleep,
            weight: self.weight.map(|(_, v)| v),
            height: self.height.map(|(_, v)| v),
            temperature: self.temperature.map(|(_, v)| v),
        }
    }
}

/// Keep the vitals value with the greatest timestamp seen so far
///
/// Ties go to the later arrival.
fn record_latest(slot: &mut Option<(ISOTimestamp, f64)>, ts: ISOTimestamp, value: Option<f64>) {
    if let Some(value) = value {
        match slot {
            Some((latest, _)) if *latest > ts => {}
            _ => *slot = Some((ts, value)),
        }
    }
}

/// Main aggregation engine
///
/// Holds only the timezone configuration used to map activity timestamps to
/// calendar dates; safe to share and call concurrently.
pub struct Aggregator {
    timezone_config: TimezoneConfig,
}

impl Aggregator {
    /// Create a new Aggregator
    pub fn new(timezone_config: TimezoneConfig) -> Self {
        Self { timezone_config }
    }

    /// Get the timezone configuration
    pub fn timezone_config(&self) -> &TimezoneConfig {
        &self.timezone_config
    }

    /// Compute fixed-shape statistics for a single calendar day
    ///
    /// An activity contributes iff its local calendar date equals `date`;
    /// time of day never matters. Unrecognized activity kinds and memo, bath,
    /// and rating records contribute nothing. The result always carries every
    /// field group, zero-floored, including for an empty input.
    pub fn daily_stats(&self, activities: &[Activity], date: NaiveDate) -> DailyStats {
        let mut acc = DayAccumulator::default();
        for activity in activities {
            if self.on_calendar_day(&activity.timestamp, date) {
                acc.add(&activity.kind);
            }
        }
        acc.into_stats()
    }

    /// Compute the analyzer's single-day summary
    ///
    /// [`Self::daily_stats`] flattened, plus the day's mean temperature
    /// reading and the latest (by timestamp) weight and height.
    pub fn daily_summary(&self, activities: &[Activity], date: NaiveDate) -> DaySummary {
        let stats = self.daily_stats(activities, date);
        let mut summary = DaySummary::from(&stats);

        let mut temperature_sum = 0.0;
        let mut temperature_count = 0u32;
        let mut weight: Option<(ISOTimestamp, f64)> = None;
        let mut height: Option<(ISOTimestamp, f64)> = None;

        for activity in activities {
            if !self.on_calendar_day(&activity.timestamp, date) {
                continue;
            }
            if let ActivityKind::Measurement {
                weight_g,
                height_cm,
                temperature_c,
            } = &activity.kind
            {
                if let Some(t) = temperature_c {
                    temperature_sum += t;
                    temperature_count += 1;
                }
                record_latest(&mut weight, activity.timestamp, *weight_g);
                record_latest(&mut height, activity.timestamp, *height_cm);
            }
        }

        if temperature_count > 0 {
            summary.avg_temperature = Some(temperature_sum / f64::from(temperature_count));
        }
        summary.weight = weight.map(|(_, v)| v);
        summary.height = height.map(|(_, v)| v);
        summary
    }

    /// Compute an ordered series of period slices over a date range
    ///
    /// Anchors start at `filter.since` and advance by one day, seven days, or
    /// one calendar month; an anchor equal to `filter.until` still produces a
    /// slice. `since > until` yields an empty series. The only error is a
    /// range that would exceed [`MAX_PERIOD_SLICES`].
    pub fn period_series(
        &self,
        activities: &[Activity],
        filter: &PeriodFilter,
    ) -> Result<Vec<PeriodSlice>> {
        let anchors = self.slice_anchors(filter)?;

        Ok(anchors
            .into_iter()
            .map(|anchor| {
                let mut acc = SliceAccumulator::default();
                for activity in activities {
                    if self.in_slice(&activity.timestamp, anchor, filter.period) {
                        acc.add(activity);
                    }
                }
                acc.into_slice(anchor)
            })
            .collect())
    }

    /// Generate the slice anchor dates for a period filter
    fn slice_anchors(&self, filter: &PeriodFilter) -> Result<Vec<NaiveDate>> {
        let mut anchors = Vec::new();
        let mut cursor = filter.since;

        while cursor <= filter.until {
            anchors.push(cursor);
            if anchors.len() > MAX_PERIOD_SLICES {
                return Err(BabystatError::RangeTooLarge {
                    max: MAX_PERIOD_SLICES,
                });
            }

            let next = match filter.period {
                Period::Day => cursor.checked_add_days(Days::new(1)),
                Period::Week => cursor.checked_add_days(Days::new(7)),
                Period::Month => cursor.checked_add_months(Months::new(1)),
            };
            match next {
                Some(next) => cursor = next,
                // calendar overflow, range ends here
                None => break,
            }
        }

        Ok(anchors)
    }

    /// Membership test for a single slice anchor at the given granularity
    fn in_slice(&self, ts: &ISOTimestamp, anchor: NaiveDate, period: Period) -> bool {
        match period {
            Period::Day => self.on_calendar_day(ts, anchor),
            Period::Week => self.in_week_window(ts, anchor),
            Period::Month => self.in_calendar_month(ts, anchor),
        }
    }

    /// Day policy: local calendar date equals the anchor
    fn on_calendar_day(&self, ts: &ISOTimestamp, day: NaiveDate) -> bool {
        *ts.to_daily_date_with_tz(&self.timezone_config.tz).inner() == day
    }

    /// Week policy: local wall clock within `[anchor 00:00, anchor+6d 00:00]`
    ///
    /// An instant range, not calendar-date equality: the upper bound is the
    /// *midnight* of the seventh day, and later activity on that day matches
    /// no week slice. Must not be folded into the day/month comparison
    /// style.
    fn in_week_window(&self, ts: &ISOTimestamp, anchor: NaiveDate) -> bool {
        let local = ts.local_naive(&self.timezone_config.tz);
        let start = anchor
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time");
        let end = (anchor + Days::new(6))
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time");
        local >= start && local <= end
    }

    /// Month policy: local calendar year and month equal the anchor's
    fn in_calendar_month(&self, ts: &ISOTimestamp, anchor: NaiveDate) -> bool {
        let date = ts.to_daily_date_with_tz(&self.timezone_config.tz);
        let date = date.inner();
        date.year() == anchor.year() && date.month() == anchor.month()
    }
}
