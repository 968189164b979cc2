//! Filtering for activity collections
//!
//! [`ActivityFilter`] narrows a loaded collection by date range and child
//! before aggregation; [`PeriodFilter`] is the period-series selection passed
//! to the aggregator. Aggregation itself never relies on filtering having
//! happened (it re-checks membership per day or slice), so filters are purely
//! a way to cut the working set down early.
//!
//! # Examples
//!
//! ```
//! use babystat_core::filters::ActivityFilter;
//! use chrono::NaiveDate;
//!
//! // Keep March 2024 activities for one child
//! let filter = ActivityFilter::new()
//!     .with_since(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
//!     .with_until(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
//!     .with_baby(babystat_core::types::BabyId::new("baby-01"));
//! ```

use crate::types::{Activity, BabyId, Period};
use chrono::NaiveDate;
use chrono_tz::Tz;

/// Filter configuration for loaded activities
///
/// All criteria are optional and combine conjunctively. Date comparisons use
/// the calendar date of the activity in the configured timezone, consistent
/// with daily bucketing.
#[derive(Debug, Clone)]
pub struct ActivityFilter {
    /// Start date filter (inclusive)
    pub since_date: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub until_date: Option<NaiveDate>,
    /// Subject child filter
    pub baby: Option<BabyId>,
    /// Timezone for calendar-date comparison
    pub tz: Tz,
}

impl Default for ActivityFilter {
    fn default() -> Self {
        Self {
            since_date: None,
            until_date: None,
            baby: None,
            tz: Tz::UTC,
        }
    }
}

impl ActivityFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start date filter
    pub fn with_since(mut self, date: NaiveDate) -> Self {
        self.since_date = Some(date);
        self
    }

    /// Set the end date filter
    pub fn with_until(mut self, date: NaiveDate) -> Self {
        self.until_date = Some(date);
        self
    }

    /// Restrict to a single child
    pub fn with_baby(mut self, baby: BabyId) -> Self {
        self.baby = Some(baby);
        self
    }

    /// Set the timezone used for calendar-date comparison
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    /// Check if an activity passes the filter
    pub fn matches(&self, activity: &Activity) -> bool {
        let date = activity.timestamp.to_daily_date_with_tz(&self.tz);
        let date = date.inner();

        if let Some(since) = &self.since_date
            && date < since
        {
            return false;
        }

        if let Some(until) = &self.until_date
            && date > until
        {
            return false;
        }

        if let Some(baby) = &self.baby
            && &activity.baby_id != baby
        {
            return false;
        }

        true
    }

    /// Apply the filter to a collection, keeping matching activities
    pub fn apply(&self, activities: Vec<Activity>) -> Vec<Activity> {
        activities.into_iter().filter(|a| self.matches(a)).collect()
    }
}

/// Period-series selection: granularity plus an inclusive date range
///
/// Slice anchors start at `since` and advance by the granularity until they
/// pass `until`; an anchor equal to `until` still produces a slice. A range
/// with `since > until` is not an error; it yields an empty series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodFilter {
    /// Slice granularity
    pub period: Period,
    /// First slice anchor (inclusive)
    pub since: NaiveDate,
    /// Last date an anchor may fall on (inclusive)
    pub until: NaiveDate,
}

impl PeriodFilter {
    /// Create a new period filter
    pub fn new(period: Period, since: NaiveDate, until: NaiveDate) -> Self {
        Self {
            period,
            since,
            until,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityKind;
    use chrono::{TimeZone, Utc};

    fn feeding_on(ts: chrono::DateTime<Utc>, baby: &str) -> Activity {
        Activity::new("a-1", baby, ts, ActivityKind::Feeding { amount_ml: 100.0 })
    }

    #[test]
    fn test_date_filter() {
        let filter = ActivityFilter::new()
            .with_since(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .with_until(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

        let before = feeding_on(Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap(), "b");
        let within = feeding_on(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(), "b");
        let after = feeding_on(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(), "b");

        assert!(!filter.matches(&before));
        assert!(filter.matches(&within));
        assert!(!filter.matches(&after));
    }

    #[test]
    fn test_baby_filter() {
        let filter = ActivityFilter::new().with_baby(BabyId::new("baby-01"));

        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert!(filter.matches(&feeding_on(ts, "baby-01")));
        assert!(!filter.matches(&feeding_on(ts, "baby-02")));
    }

    #[test]
    fn test_date_filter_respects_timezone() {
        // 23:30 UTC on 02-29 is already 03-01 in Seoul
        let filter = ActivityFilter::new()
            .with_since(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .with_timezone(chrono_tz::Asia::Seoul);

        let activity = feeding_on(Utc.with_ymd_and_hms(2024, 2, 29, 23, 30, 0).unwrap(), "b");
        assert!(filter.matches(&activity));
    }

    #[test]
    fn test_apply_keeps_only_matches() {
        let filter = ActivityFilter::new().with_baby(BabyId::new("baby-01"));
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let kept = filter.apply(vec![feeding_on(ts, "baby-01"), feeding_on(ts, "baby-02")]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].baby_id.as_str(), "baby-01");
    }
}
