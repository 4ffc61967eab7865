//! Telemetry store contents: LadleReading, TemperatureHistory, overrides

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::PlantZone;

// ============================================================================
// Temperature History
// ============================================================================

/// One (timestamp, temperature) sample in a ladle's trend history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistorySample {
    pub timestamp: DateTime<Utc>,
    /// Temperature in °C. Real-valued because seeded samples carry sensor jitter.
    pub temperature: f64,
}

/// Fixed-capacity temperature history (ring buffer, oldest evicted first).
///
/// Timestamps are kept strictly increasing: a sample stamped at or before the
/// newest one is nudged forward by one microsecond.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureHistory {
    capacity: usize,
    samples: VecDeque<HistorySample>,
}

impl TemperatureHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn push(&mut self, timestamp: DateTime<Utc>, temperature: f64) {
        if self.capacity == 0 {
            return;
        }
        let timestamp = match self.samples.back() {
            Some(last) if timestamp <= last.timestamp => last.timestamp + Duration::microseconds(1),
            _ => timestamp,
        };
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(HistorySample {
            timestamp,
            temperature,
        });
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    /// Chronological copy of all samples
    pub fn to_vec(&self) -> Vec<HistorySample> {
        self.samples.iter().copied().collect()
    }
}

// ============================================================================
// Ladle Reading
// ============================================================================

/// Current state of one ladle: sensor values, location and trend history.
///
/// Only the telemetry store mutates readings, and every write goes through
/// bounds clamping, so a reading handed out by the store is always in range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LadleReading {
    /// Stable fleet identifier, e.g. "L-02"
    pub id: String,
    /// Steel temperature (°C)
    pub temperature: i32,
    /// Mechanical stress index
    pub stress: i32,
    /// Vibration level, two decimal places
    pub vibration: f64,
    /// Current plant zone
    pub location: PlantZone,
    /// Recent temperature samples
    pub history: TemperatureHistory,
}

// ============================================================================
// Partial Updates
// ============================================================================

/// Partial set of reading fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReadingFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PlantZone>,
}

impl ReadingFields {
    pub fn with_temperature(mut self, temperature: i32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_stress(mut self, stress: i32) -> Self {
        self.stress = Some(stress);
        self
    }

    pub fn with_vibration(mut self, vibration: f64) -> Self {
        self.vibration = Some(vibration);
        self
    }

    pub fn with_location(mut self, location: PlantZone) -> Self {
        self.location = Some(location);
        self
    }
}

/// Manual override for one ladle, applied after the random walk of a tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LadleOverride {
    pub ladle_id: String,
    #[serde(flatten)]
    pub fields: ReadingFields,
}

impl LadleOverride {
    pub fn new(ladle_id: impl Into<String>, fields: ReadingFields) -> Self {
        Self {
            ladle_id: ladle_id.into(),
            fields,
        }
    }

    /// Overheat scenario used by operators to exercise the alert path:
    /// temperature, stress and vibration all past their critical limits.
    pub fn forced_overheat(ladle_id: impl Into<String>) -> Self {
        Self::new(
            ladle_id,
            ReadingFields::default()
                .with_temperature(1625)
                .with_stress(86)
                .with_vibration(0.8),
        )
    }
}
