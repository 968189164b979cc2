//! Core types and utilities for babystat
//!
//! This crate provides the foundational pieces shared by the babystat
//! library and CLI: the typed activity model with alias normalization, the
//! fixed-shape aggregation output types, error handling, activity and period
//! filters, and timezone configuration.

pub mod aggregation_types;
pub mod error;
pub mod filters;
pub mod timezone;
pub mod types;

// Re-export commonly used types
pub use error::{BabystatError, Result};
pub use types::{
    Activity, ActivityCategory, ActivityId, ActivityKind, BabyId, DailyDate, ISOTimestamp, Period,
};
