//! Monitor counters and fleet summaries
//!
//! Plain serializable views handed to the API layer. Nothing here holds a lock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::simulation::StepOutcome;
use crate::types::{Analysis, HealthStatus, LadleReading};

// ============================================================================
// Status Counts
// ============================================================================

/// Fleet totals per health status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: HealthStatus) {
        self.total += 1;
        match status {
            HealthStatus::Normal => self.normal += 1,
            HealthStatus::Warning => self.warning += 1,
            HealthStatus::Critical => self.critical += 1,
        }
    }
}

impl FromIterator<HealthStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = HealthStatus>>(iter: I) -> Self {
        let mut counts = Self::default();
        for status in iter {
            counts.record(status);
        }
        counts
    }
}

// ============================================================================
// Monitor Statistics
// ============================================================================

/// Lifetime counters for one monitor instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonitorStats {
    /// Ticks completed, scheduled and override-triggered alike
    pub ticks: u64,
    /// Alerts appended since startup (evicted ones included)
    pub alerts_raised: u64,
    /// Whether the periodic loop is currently scheduled
    pub running: bool,
    pub interval_ms: u64,
    pub started_at: DateTime<Utc>,
    pub last_tick_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Tick Report
// ============================================================================

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// 1-based tick sequence number
    pub tick: u64,
    pub timestamp: DateTime<Utc>,
    pub step: StepOutcome,
    /// Alerts appended by this tick
    pub alerts: usize,
}

// ============================================================================
// Fleet Rows
// ============================================================================

/// One ladle's reading alongside its classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LadleStatus {
    pub reading: LadleReading,
    pub analysis: Analysis,
}
