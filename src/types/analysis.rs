//! Health classifier output: Issue labels and the Analysis result

use serde::{Deserialize, Serialize};

use super::HealthStatus;

/// A single triggered health rule.
///
/// Each metric contributes at most one issue: either its hard-critical label
/// or its approaching-limit label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Issue {
    Overheating,
    TempApproachingLimit,
    HighStress,
    StressApproachingLimit,
    VibrationAnomaly,
    VibrationApproachingLimit,
}

impl Issue {
    /// Operator-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Issue::Overheating => "Overheating",
            Issue::TempApproachingLimit => "Temp Approaching Limit",
            Issue::HighStress => "High Stress (crack risk)",
            Issue::StressApproachingLimit => "Stress Approaching Limit",
            Issue::VibrationAnomaly => "Vibration Anomaly",
            Issue::VibrationApproachingLimit => "Vibration Approaching Limit",
        }
    }

    /// Hard-critical issues force a Critical status.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Issue::Overheating | Issue::HighStress | Issue::VibrationAnomaly
        )
    }

    pub fn is_approaching_limit(&self) -> bool {
        !self.is_critical()
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Issue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Issue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        [
            Issue::Overheating,
            Issue::TempApproachingLimit,
            Issue::HighStress,
            Issue::StressApproachingLimit,
            Issue::VibrationAnomaly,
            Issue::VibrationApproachingLimit,
        ]
        .into_iter()
        .find(|issue| issue.label() == label)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown issue label '{label}'")))
    }
}

/// Classification of one ladle snapshot. Derived on request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Analysis {
    pub status: HealthStatus,
    /// Triggered issues in rule-table order (temperature, stress, vibration)
    pub issues: Vec<Issue>,
    pub recommendation: String,
    pub explanation: String,
}

impl Analysis {
    pub fn is_critical(&self) -> bool {
        self.status == HealthStatus::Critical
    }
}
