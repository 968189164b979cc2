//! Heuristic analyzer over single-day summaries
//!
//! Evaluates a fixed table of independent threshold rules against a
//! [`DaySummary`] and emits machine-readable flags plus human-readable
//! suggestions. The rules are order-independent: each looks at one dimension
//! of the summary and either fires or stays silent. When nothing fires the
//! report carries the single `ok` flag.
//!
//! The flag vocabulary is consumed by the app's suggestion view; renaming a
//! flag is a breaking change even though the suggestion texts are free-form.

use babystat_core::aggregation_types::DaySummary;
use serde::{Deserialize, Serialize};

/// Fewer feedings than this in a day flags `low_feedings`
pub const MIN_FEEDINGS_PER_DAY: u32 = 6;
/// Fewer slept minutes than this in a day flags `low_sleep`
pub const MIN_SLEEP_MINUTES: f64 = 600.0;
/// Average temperature at or above this flags `fever` (Celsius)
pub const FEVER_TEMPERATURE_C: f64 = 38.0;
/// Weight below this flags `low_weight` (grams, i.e. 3.0 kg)
pub const LOW_WEIGHT_G: f64 = 3000.0;
/// Fewer wet diapers than this in a day flags `low_wet_diapers`
pub const MIN_WET_DIAPERS: u32 = 4;

/// Analyzer output: flags for machines, suggestions for parents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub suggestions: Vec<String>,
    pub flags: Vec<String>,
}

/// One threshold rule of the table
struct Rule {
    flag: &'static str,
    suggestion: &'static str,
    applies: fn(&DaySummary) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        flag: "low_feedings",
        suggestion: "Feeding count is on the low side today; consider offering an extra feed.",
        applies: |s| s.total_feedings < MIN_FEEDINGS_PER_DAY,
    },
    Rule {
        flag: "low_sleep",
        suggestion: "Total sleep is under 10 hours; an earlier nap or bedtime may help.",
        applies: |s| s.total_sleep_minutes < MIN_SLEEP_MINUTES,
    },
    Rule {
        flag: "fever",
        suggestion: "Average temperature is 38\u{00b0}C or higher; monitor closely and consider contacting a pediatrician.",
        applies: |s| s.avg_temperature.is_some_and(|t| t >= FEVER_TEMPERATURE_C),
    },
    Rule {
        flag: "low_weight",
        suggestion: "Latest weight is below 3.0 kg; keep an eye on weight gain with your pediatrician.",
        applies: |s| s.weight.is_some_and(|w| w < LOW_WEIGHT_G),
    },
    Rule {
        flag: "low_wet_diapers",
        suggestion: "Fewer than 4 wet diapers today; low output can be a hydration signal.",
        applies: |s| s.wet_diapers < MIN_WET_DIAPERS,
    },
];

/// Evaluate the rule table against a single-day summary
///
/// Pure and order-independent; flags appear in table order. A summary that
/// triggers nothing yields the single `ok` flag with a neutral suggestion.
///
/// # Examples
/// ```
/// use babystat::analyzer::analyze;
/// use babystat::aggregation_types::DaySummary;
///
/// let report = analyze(&DaySummary {
///     total_feedings: 8,
///     wet_diapers: 6,
///     total_sleep_minutes: 720.0,
///     ..Default::default()
/// });
/// assert_eq!(report.flags, vec!["ok"]);
/// ```
pub fn analyze(summary: &DaySummary) -> AnalysisReport {
    let mut report = AnalysisReport::default();

    for rule in RULES {
        if (rule.applies)(summary) {
            report.flags.push(rule.flag.to_string());
            report.suggestions.push(rule.suggestion.to_string());
        }
    }

    if report.flags.is_empty() {
        report.flags.push("ok".to_string());
        report
            .suggestions
            .push("Everything looks on track today.".to_string());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_day() -> DaySummary {
        DaySummary {
            total_feedings: 8,
            total_feeding_ml: 760.0,
            wet_diapers: 6,
            dirty_diapers: 2,
            total_sleep_minutes: 780.0,
            avg_temperature: Some(36.8),
            weight: Some(4500.0),
            height: Some(55.0),
        }
    }

    #[test]
    fn test_healthy_day_is_ok() {
        let report = analyze(&healthy_day());
        assert_eq!(report.flags, vec!["ok"]);
        assert_eq!(report.suggestions.len(), 1);
    }

    #[test]
    fn test_low_feedings() {
        let summary = DaySummary {
            total_feedings: 5,
            ..healthy_day()
        };
        let report = analyze(&summary);
        assert_eq!(report.flags, vec!["low_feedings"]);
    }

    #[test]
    fn test_low_sleep() {
        let summary = DaySummary {
            total_sleep_minutes: 599.0,
            ..healthy_day()
        };
        assert_eq!(analyze(&summary).flags, vec!["low_sleep"]);
    }

    #[test]
    fn test_fever_boundary_is_inclusive() {
        let summary = DaySummary {
            avg_temperature: Some(38.0),
            ..healthy_day()
        };
        assert_eq!(analyze(&summary).flags, vec!["fever"]);

        let summary = DaySummary {
            avg_temperature: Some(37.9),
            ..healthy_day()
        };
        assert_eq!(analyze(&summary).flags, vec!["ok"]);
    }

    #[test]
    fn test_low_weight_requires_a_measurement() {
        let summary = DaySummary {
            weight: Some(2900.0),
            ..healthy_day()
        };
        assert_eq!(analyze(&summary).flags, vec!["low_weight"]);

        let summary = DaySummary {
            weight: None,
            ..healthy_day()
        };
        assert_eq!(analyze(&summary).flags, vec!["ok"]);
    }

    #[test]
    fn test_low_wet_diapers() {
        let summary = DaySummary {
            wet_diapers: 3,
            ..healthy_day()
        };
        assert_eq!(analyze(&summary).flags, vec!["low_wet_diapers"]);
    }

    #[test]
    fn test_multiple_rules_fire_together() {
        let summary = DaySummary {
            total_feedings: 4,
            total_sleep_minutes: 480.0,
            avg_temperature: Some(38.5),
            ..healthy_day()
        };
        let report = analyze(&summary);
        assert!(report.flags.contains(&"low_feedings".to_string()));
        assert!(report.flags.contains(&"low_sleep".to_string()));
        assert!(report.flags.contains(&"fever".to_string()));
        assert!(!report.flags.contains(&"ok".to_string()));
        assert_eq!(report.flags.len(), report.suggestions.len());
    }

    #[test]
    fn test_analyze_is_pure() {
        let summary = healthy_day();
        assert_eq!(analyze(&summary), analyze(&summary));
    }
}
