//! Core domain types for babystat
//!
//! This module contains the fundamental types used throughout the babystat
//! library: identifier newtypes, timestamp and calendar-date wrappers, and the
//! `Activity` record with its typed payload.
//!
//! Exported records arrive as loosely-shaped JSON (a string `type` tag plus a
//! free-form `details` object). Everything downstream of this module works on
//! the typed [`ActivityKind`] union instead; the one-time conversion in
//! [`Activity::from_raw`] is where tag aliases are normalized and missing or
//! malformed detail fields are coerced to safe defaults.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strongly-typed activity identifier
///
/// Opaque and stable; unique within a single export. Aggregation never
/// inspects it, but it is preserved through loading for traceability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivityId(String);

impl ActivityId {
    /// Create a new ActivityId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly-typed identifier of the subject child
///
/// Aggregation arithmetic ignores this field entirely; it exists so callers
/// can scope an activity collection to one child before aggregating.
///
/// # Examples
/// ```
/// use babystat_core::types::BabyId;
///
/// let baby = BabyId::new("baby-01");
/// assert_eq!(baby.as_str(), "baby-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BabyId(String);

impl BabyId {
    /// Create a new BabyId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BabyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BabyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// UTC timestamp wrapper
///
/// Wraps chrono's `DateTime<Utc>` and keeps full precision; activities are
/// never normalized to midnight. Calendar-date bucketing goes through
/// [`ISOTimestamp::to_daily_date_with_tz`] so the grouping timezone is always
/// an explicit choice of the caller.
///
/// # Examples
/// ```
/// use babystat_core::types::ISOTimestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = ISOTimestamp::new(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
/// assert_eq!(ts.to_daily_date().format("%Y-%m-%d"), "2024-03-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ISOTimestamp(DateTime<Utc>);

impl ISOTimestamp {
    /// Create a new ISOTimestamp
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the inner DateTime
    pub fn inner(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Convert to DailyDate using UTC
    pub fn to_daily_date(&self) -> DailyDate {
        DailyDate::new(self.0.date_naive())
    }

    /// Convert to DailyDate using the specified timezone
    pub fn to_daily_date_with_tz(&self, tz: &Tz) -> DailyDate {
        DailyDate::new(self.0.with_timezone(tz).date_naive())
    }

    /// Wall-clock date and time in the specified timezone
    pub fn local_naive(&self, tz: &Tz) -> chrono::NaiveDateTime {
        self.0.with_timezone(tz).naive_local()
    }
}

impl AsRef<DateTime<Utc>> for ISOTimestamp {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.0
    }
}

/// Calendar date used for daily bucketing
///
/// A date without time information. Two activities belong to the same daily
/// bucket exactly when their timestamps map to equal `DailyDate`s in the
/// grouping timezone.
///
/// # Examples
/// ```
/// use babystat_core::types::DailyDate;
/// use chrono::NaiveDate;
///
/// let daily = DailyDate::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert_eq!(daily.format("%m/%d"), "03/01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DailyDate(NaiveDate);

impl DailyDate {
    /// Create a new DailyDate
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Get the inner NaiveDate
    pub fn inner(&self) -> &NaiveDate {
        &self.0
    }

    /// Create from a timestamp using UTC
    pub fn from_timestamp(ts: &ISOTimestamp) -> Self {
        ts.to_daily_date()
    }

    /// Create from a timestamp using the specified timezone
    pub fn from_timestamp_with_tz(ts: &ISOTimestamp, tz: &Tz) -> Self {
        ts.to_daily_date_with_tz(tz)
    }

    /// Format with a chrono format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }
}

/// Canonical activity categories
///
/// Exports written by older app versions carry several spellings for the same
/// category: the current English tags, the legacy `diaperChange` alias, and
/// localized tags from the first release. [`ActivityCategory::from_tag`] is
/// the single normalization point; no other code matches on raw tag strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityCategory {
    Feeding,
    Sleep,
    Diaper,
    Measurement,
    Memo,
    Bath,
    DailyRating,
}

impl ActivityCategory {
    /// Map a raw `type` tag to its canonical category
    ///
    /// Returns `None` for tags no known export version has produced; callers
    /// keep such records as [`ActivityKind::Other`] rather than failing.
    ///
    /// # Examples
    /// ```
    /// use babystat_core::types::ActivityCategory;
    ///
    /// assert_eq!(
    ///     ActivityCategory::from_tag("diaperChange"),
    ///     Some(ActivityCategory::Diaper)
    /// );
    /// assert_eq!(ActivityCategory::from_tag("teething"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "feeding" | "수유" => Some(Self::Feeding),
            "sleep" | "수면" => Some(Self::Sleep),
            "diaper" | "diaperChange" | "기저귀" => Some(Self::Diaper),
            "measurement" => Some(Self::Measurement),
            "memo" | "메모" => Some(Self::Memo),
            "bath" => Some(Self::Bath),
            "dailyRating" => Some(Self::DailyRating),
            _ => None,
        }
    }

    /// The canonical tag string for this category
    pub fn canonical_tag(&self) -> &'static str {
        match self {
            Self::Feeding => "feeding",
            Self::Sleep => "sleep",
            Self::Diaper => "diaper",
            Self::Measurement => "measurement",
            Self::Memo => "memo",
            Self::Bath => "bath",
            Self::DailyRating => "dailyRating",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_tag())
    }
}

/// Typed activity payload
///
/// Replaces the wire format's free-form `details` object. Each variant
/// carries only the fields that category can have, so downstream code never
/// re-checks field presence: numeric fields missing on the wire arrive here
/// as `0.0`, missing booleans as `false`, and genuinely optional vitals as
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActivityKind {
    /// Bottle or nursed feeding with the consumed volume
    Feeding {
        /// Volume in milliliters; zero when not recorded
        amount_ml: f64,
    },
    /// A sleep session
    Sleep {
        /// Duration in minutes; zero when not recorded
        duration_min: f64,
    },
    /// A diaper change; one change may be both wet and dirty
    Diaper { urine: bool, stool: bool },
    /// Growth and health measurements, each independently optional
    Measurement {
        weight_g: Option<f64>,
        height_cm: Option<f64>,
        temperature_c: Option<f64>,
    },
    /// Free-text note; content is never aggregated numerically
    Memo { notes: String },
    Bath,
    DailyRating { rating: Option<u8> },
    /// Unrecognized type tag, preserved verbatim
    ///
    /// Contributes to no aggregate bucket; aggregation is total over its
    /// input and must not fail on categories introduced by newer exports.
    Other { tag: String },
}

impl ActivityKind {
    /// The canonical category, or `None` for [`ActivityKind::Other`]
    pub fn category(&self) -> Option<ActivityCategory> {
        match self {
            Self::Feeding { .. } => Some(ActivityCategory::Feeding),
            Self::Sleep { .. } => Some(ActivityCategory::Sleep),
            Self::Diaper { .. } => Some(ActivityCategory::Diaper),
            Self::Measurement { .. } => Some(ActivityCategory::Measurement),
            Self::Memo { .. } => Some(ActivityCategory::Memo),
            Self::Bath => Some(ActivityCategory::Bath),
            Self::DailyRating { .. } => Some(ActivityCategory::DailyRating),
            Self::Other { .. } => None,
        }
    }
}

/// A single logged activity
///
/// Immutable and externally sourced. The timestamp is the sole temporal key;
/// the baby id is carried for filtering but never enters aggregation
/// arithmetic.
///
/// # Examples
/// ```
/// use babystat_core::types::{Activity, ActivityKind};
/// use chrono::{TimeZone, Utc};
///
/// let activity = Activity::new(
///     "a-1",
///     "baby-01",
///     Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
///     ActivityKind::Feeding { amount_ml: 120.0 },
/// );
/// assert_eq!(activity.timestamp.to_daily_date().format("%Y-%m-%d"), "2024-03-01");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    /// Stable identifier
    pub id: ActivityId,
    /// Subject child
    pub baby_id: BabyId,
    /// When the activity happened
    pub timestamp: ISOTimestamp,
    /// Typed payload
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl Activity {
    /// Construct an activity from plain parts
    pub fn new(
        id: impl Into<String>,
        baby_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        kind: ActivityKind,
    ) -> Self {
        Self {
            id: ActivityId::new(id),
            baby_id: BabyId::new(baby_id),
            timestamp: ISOTimestamp::new(timestamp),
            kind,
        }
    }

    /// Convert a wire-format record into a typed activity
    ///
    /// Total over its input: unknown tags become [`ActivityKind::Other`] and
    /// malformed detail fields degrade to defaults instead of erroring. A bad
    /// record must never prevent aggregation of its neighbors, so the only
    /// records dropped before this point are those without a parseable
    /// timestamp (handled at the loader).
    pub fn from_raw(raw: RawActivity) -> Self {
        let details = &raw.details;
        let kind = match ActivityCategory::from_tag(&raw.kind) {
            Some(ActivityCategory::Feeding) => ActivityKind::Feeding {
                amount_ml: num_field(details, "amount"),
            },
            Some(ActivityCategory::Sleep) => ActivityKind::Sleep {
                duration_min: num_field(details, "duration"),
            },
            Some(ActivityCategory::Diaper) => ActivityKind::Diaper {
                urine: bool_field(details, "isUrine"),
                stool: bool_field(details, "isStool"),
            },
            Some(ActivityCategory::Measurement) => ActivityKind::Measurement {
                weight_g: opt_num_field(details, "weight"),
                height_cm: opt_num_field(details, "height"),
                temperature_c: opt_num_field(details, "temperature"),
            },
            Some(ActivityCategory::Memo) => ActivityKind::Memo {
                notes: str_field(details, "notes"),
            },
            Some(ActivityCategory::Bath) => ActivityKind::Bath,
            Some(ActivityCategory::DailyRating) => ActivityKind::DailyRating {
                rating: opt_num_field(details, "rating").map(|r| r as u8),
            },
            None => ActivityKind::Other { tag: raw.kind },
        };

        Self {
            id: ActivityId::new(raw.id),
            baby_id: BabyId::new(raw.baby_id),
            timestamp: ISOTimestamp::new(raw.timestamp),
            kind,
        }
    }
}

/// Wire-format activity record as written by the app's export
///
/// Only the timestamp must be well-formed; a record that cannot be placed in
/// time cannot be bucketed at all. Everything else defaults and is coerced
/// in [`Activity::from_raw`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub baby_id: String,
    /// Raw type tag; aliases are resolved by [`ActivityCategory::from_tag`]
    #[serde(rename = "type", default)]
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    /// Free-form details object
    #[serde(default)]
    pub details: serde_json::Value,
}

/// Numeric detail field coerced to zero when absent or non-numeric
fn num_field(details: &serde_json::Value, key: &str) -> f64 {
    opt_num_field(details, key).unwrap_or(0.0)
}

/// Numeric detail field kept optional; non-numeric values count as absent
fn opt_num_field(details: &serde_json::Value, key: &str) -> Option<f64> {
    details.get(key).and_then(|v| v.as_f64())
}

/// Boolean detail field coerced to false when absent or non-boolean
fn bool_field(details: &serde_json::Value, key: &str) -> bool {
    details.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

/// String detail field coerced to empty when absent
fn str_field(details: &serde_json::Value, key: &str) -> String {
    details
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Period granularity for series aggregation
///
/// # Examples
/// ```
/// use babystat_core::types::Period;
/// use std::str::FromStr;
///
/// assert_eq!(Period::from_str("week").unwrap(), Period::Week);
/// assert_eq!(Period::Day.to_string(), "day");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One slice per calendar day
    #[default]
    Day,
    /// One slice per 7-day window
    Week,
    /// One slice per calendar month
    Month,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(format!("Invalid period: {s}")),
        }
    }
}
