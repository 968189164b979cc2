//! Common fixture builders for babystat integration tests
//!
//! Integration tests are separate binaries and cannot reach the crates'
//! `#[cfg(test)]` helpers, so the builders live here.

#![allow(dead_code)]

use babystat::types::{Activity, ActivityKind};
use chrono::{DateTime, TimeZone, Utc};

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn feeding(id: &str, ts: DateTime<Utc>, ml: f64) -> Activity {
    Activity::new(id, "baby-01", ts, ActivityKind::Feeding { amount_ml: ml })
}

pub fn sleep(id: &str, ts: DateTime<Utc>, minutes: f64) -> Activity {
    Activity::new(
        id,
        "baby-01",
        ts,
        ActivityKind::Sleep {
            duration_min: minutes,
        },
    )
}

pub fn diaper(id: &str, ts: DateTime<Utc>, urine: bool, stool: bool) -> Activity {
    Activity::new(id, "baby-01", ts, ActivityKind::Diaper { urine, stool })
}

pub fn measurement(
    id: &str,
    ts: DateTime<Utc>,
    weight_g: Option<f64>,
    height_cm: Option<f64>,
    temperature_c: Option<f64>,
) -> Activity {
    Activity::new(
        id,
        "baby-01",
        ts,
        ActivityKind::Measurement {
            weight_g,
            height_cm,
            temperature_c,
        },
    )
}

pub fn memo(id: &str, ts: DateTime<Utc>, notes: &str) -> Activity {
    Activity::new(
        id,
        "baby-01",
        ts,
        ActivityKind::Memo {
            notes: notes.to_string(),
        },
    )
}
