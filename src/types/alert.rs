//! Alert log contents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Analysis, LadleReading, PlantZone};

/// Record of a ladle classified Critical during a tick. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertEntry {
    pub timestamp: DateTime<Utc>,
    pub ladle_id: String,
    pub location: PlantZone,
    pub explanation: String,
    pub recommendation: String,
}

impl AlertEntry {
    /// Build an alert from the snapshot it was raised on.
    pub fn from_analysis(timestamp: DateTime<Utc>, reading: &LadleReading, analysis: &Analysis) -> Self {
        Self {
            timestamp,
            ladle_id: reading.id.clone(),
            location: reading.location,
            explanation: analysis.explanation.clone(),
            recommendation: analysis.recommendation.clone(),
        }
    }
}

impl std::fmt::Display for AlertEntry {
    /// One-line form used in the log feed: `2025-01-18 08:00:00 - L-02 at LF-1: ... Rec: ...`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} at {}: {} Rec: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.ladle_id,
            self.location,
            self.explanation,
            self.recommendation
        )
    }
}
