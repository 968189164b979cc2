//! Timezone resolution for calendar-date bucketing
//!
//! Daily and period aggregation compare calendar-date components, so the
//! timezone those components are computed in changes which bucket an activity
//! lands in. This module resolves the grouping timezone from an explicit
//! name, a UTC override, or the system's local zone.

use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Configuration for the timezone used by date grouping
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// The timezone to use for date operations
    pub tz: Tz,
    /// Whether the timezone is UTC
    pub is_utc: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        let tz = local_timezone();
        Self {
            is_utc: tz == Tz::UTC,
            tz,
        }
    }
}

impl TimezoneConfig {
    /// Resolve the grouping timezone from user-supplied options
    ///
    /// `use_utc` wins over `timezone_str`; with neither given, the system's
    /// local timezone is detected.
    pub fn resolve(timezone_str: Option<&str>, use_utc: bool) -> crate::error::Result<Self> {
        if use_utc {
            return Ok(Self {
                tz: Tz::UTC,
                is_utc: true,
            });
        }

        if let Some(tz_str) = timezone_str {
            let tz = Tz::from_str(tz_str).map_err(|_| {
                crate::error::BabystatError::InvalidTimezone(format!(
                    "'{tz_str}'. Use format like 'America/New_York', 'Asia/Seoul', or 'UTC'"
                ))
            })?;
            Ok(Self {
                tz,
                is_utc: tz == Tz::UTC,
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Display name for the configured timezone
    pub fn display_name(&self) -> &str {
        if self.is_utc { "UTC" } else { self.tz.name() }
    }
}

/// Detect the system's local timezone, falling back to UTC
pub fn local_timezone() -> Tz {
    // TZ takes precedence when it names a valid zone
    if let Ok(tz_str) = std::env::var("TZ")
        && let Ok(tz) = Tz::from_str(&tz_str)
    {
        debug!("Using timezone from TZ environment variable: {}", tz_str);
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(tz_str) => match Tz::from_str(&tz_str) {
            Ok(tz) => {
                debug!("Using system timezone: {}", tz_str);
                tz
            }
            Err(_) => {
                debug!("Could not parse system timezone '{}', using UTC", tz_str);
                Tz::UTC
            }
        },
        Err(e) => {
            debug!("Could not detect system timezone: {:?}, using UTC", e);
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_utc_flag() {
        let config = TimezoneConfig::resolve(None, true).unwrap();
        assert!(config.is_utc);
        assert_eq!(config.tz, Tz::UTC);
        assert_eq!(config.display_name(), "UTC");
    }

    #[test]
    fn test_resolve_explicit_name() {
        let config = TimezoneConfig::resolve(Some("Asia/Seoul"), false).unwrap();
        assert!(!config.is_utc);
        assert_eq!(config.tz.name(), "Asia/Seoul");
    }

    #[test]
    fn test_resolve_invalid_name() {
        let result = TimezoneConfig::resolve(Some("Moon/Tycho"), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_utc_by_name_sets_flag() {
        let config = TimezoneConfig::resolve(Some("UTC"), false).unwrap();
        assert!(config.is_utc);
        assert_eq!(config.tz, Tz::UTC);
    }
}
