//! Health Classifier - deterministic rule-based ladle health assessment
//!
//! Maps a ladle snapshot to a [`HealthStatus`], an operator recommendation and
//! a one-sentence explanation. Pure: no state, no locks, no side effects, so it
//! can be called from the monitoring loop and any number of readers at once.
//!
//! ## Rules
//!
//! | Metric      | Critical                          | Approaching limit                       |
//! |-------------|-----------------------------------|-----------------------------------------|
//! | temperature | `> 1600` Overheating              | `1580..=1600` Temp Approaching Limit    |
//! | stress      | `> 80` High Stress (crack risk)   | `75..=80` Stress Approaching Limit      |
//! | vibration   | `> 0.7` Vibration Anomaly         | `0.6..=0.7` Vibration Approaching Limit |

pub mod rules;

use crate::types::{Analysis, HealthStatus, Issue, LadleReading};
use rules::{ACTION_SEPARATOR, CRITICAL_ACTIONS, MONITORING_ACTION, NORMAL_RECOMMENDATION, RULES};

/// Classify one ladle snapshot.
pub fn classify(reading: &LadleReading) -> Analysis {
    let issues: Vec<Issue> = RULES.iter().filter_map(|rule| rule.evaluate(reading)).collect();
    let status = aggregate_status(&issues);

    Analysis {
        status,
        recommendation: recommend(status, &issues),
        explanation: explain(status, &issues),
        issues,
    }
}

/// Critical if any hard-critical issue, Warning if any issue at all.
fn aggregate_status(issues: &[Issue]) -> HealthStatus {
    if issues.iter().any(Issue::is_critical) {
        HealthStatus::Critical
    } else if issues.is_empty() {
        HealthStatus::Normal
    } else {
        HealthStatus::Warning
    }
}

fn recommend(status: HealthStatus, issues: &[Issue]) -> String {
    if status == HealthStatus::Normal {
        return NORMAL_RECOMMENDATION.to_string();
    }

    let mut parts: Vec<&str> = CRITICAL_ACTIONS
        .iter()
        .filter(|(issue, _)| issues.contains(issue))
        .map(|(_, action)| *action)
        .collect();
    if issues.iter().any(Issue::is_approaching_limit) {
        parts.push(MONITORING_ACTION);
    }
    parts.join(ACTION_SEPARATOR)
}

fn explain(status: HealthStatus, issues: &[Issue]) -> String {
    let listed = if issues.is_empty() {
        "None".to_string()
    } else {
        issues.iter().map(Issue::label).collect::<Vec<_>>().join(", ")
    };
    format!("Issues detected: {listed}. Status: {status}.")
}
