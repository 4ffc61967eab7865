//! Ordered health rule table.
//!
//! One row per metric, evaluated independently. The critical predicate is
//! checked first; the approaching-limit band only when the metric is not
//! critical. Limits are literal plant values: each band ends exactly where its
//! critical limit starts, so no value can satisfy both predicates.

use crate::types::{Issue, LadleReading};

// ============================================================================
// Limits
// ============================================================================

/// Temperature strictly above this is Overheating (°C).
pub const TEMPERATURE_CRITICAL_ABOVE: i32 = 1600;
/// Inclusive approaching-limit band for temperature (°C).
pub const TEMPERATURE_WARNING_BAND: (i32, i32) = (1580, 1600);

/// Stress strictly above this is High Stress.
pub const STRESS_CRITICAL_ABOVE: i32 = 80;
/// Inclusive approaching-limit band for stress.
pub const STRESS_WARNING_BAND: (i32, i32) = (75, 80);

/// Vibration strictly above this is a Vibration Anomaly.
pub const VIBRATION_CRITICAL_ABOVE: f64 = 0.7;
/// Inclusive approaching-limit band for vibration.
pub const VIBRATION_WARNING_BAND: (f64, f64) = (0.6, 0.7);

// ============================================================================
// Rule Table
// ============================================================================

/// Sensor a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Stress,
    Vibration,
}

/// One row of the rule table.
pub struct MetricRule {
    pub metric: Metric,
    pub critical: fn(&LadleReading) -> bool,
    pub warning: fn(&LadleReading) -> bool,
    pub critical_issue: Issue,
    pub warning_issue: Issue,
}

impl MetricRule {
    /// At most one issue per metric; critical takes precedence.
    pub fn evaluate(&self, reading: &LadleReading) -> Option<Issue> {
        if (self.critical)(reading) {
            Some(self.critical_issue)
        } else if (self.warning)(reading) {
            Some(self.warning_issue)
        } else {
            None
        }
    }
}

fn temperature_critical(r: &LadleReading) -> bool {
    r.temperature > TEMPERATURE_CRITICAL_ABOVE
}

fn temperature_warning(r: &LadleReading) -> bool {
    let (low, high) = TEMPERATURE_WARNING_BAND;
    (low..=high).contains(&r.temperature)
}

fn stress_critical(r: &LadleReading) -> bool {
    r.stress > STRESS_CRITICAL_ABOVE
}

fn stress_warning(r: &LadleReading) -> bool {
    let (low, high) = STRESS_WARNING_BAND;
    (low..=high).contains(&r.stress)
}

fn vibration_critical(r: &LadleReading) -> bool {
    r.vibration > VIBRATION_CRITICAL_ABOVE
}

fn vibration_warning(r: &LadleReading) -> bool {
    let (low, high) = VIBRATION_WARNING_BAND;
    (low..=high).contains(&r.vibration)
}

/// Rules in evaluation order. Issue order in an analysis follows this order.
pub const RULES: [MetricRule; 3] = [
    MetricRule {
        metric: Metric::Temperature,
        critical: temperature_critical,
        warning: temperature_warning,
        critical_issue: Issue::Overheating,
        warning_issue: Issue::TempApproachingLimit,
    },
    MetricRule {
        metric: Metric::Stress,
        critical: stress_critical,
        warning: stress_warning,
        critical_issue: Issue::HighStress,
        warning_issue: Issue::StressApproachingLimit,
    },
    MetricRule {
        metric: Metric::Vibration,
        critical: vibration_critical,
        warning: vibration_warning,
        critical_issue: Issue::VibrationAnomaly,
        warning_issue: Issue::VibrationApproachingLimit,
    },
];

// ============================================================================
// Recommendation Phrases
// ============================================================================

/// Recommendation when nothing is triggered.
pub const NORMAL_RECOMMENDATION: &str = "Normal operation — continue monitoring.";

/// Action per hard-critical issue, in the order they are joined.
pub const CRITICAL_ACTIONS: [(Issue, &str); 3] = [
    (Issue::Overheating, "Immediate cooling required"),
    (Issue::HighStress, "Inspect refractory lining / route to maintenance"),
    (Issue::VibrationAnomaly, "Check structural balance and mounting"),
];

/// Appended once when any approaching-limit issue is present.
pub const MONITORING_ACTION: &str = "Increase monitoring frequency";

/// Separator between recommendation phrases.
pub const ACTION_SEPARATOR: &str = " + ";
