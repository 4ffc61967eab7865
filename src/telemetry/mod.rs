//! Telemetry Store - current readings and trend history per ladle
//!
//! Pure data: the store clamps every write to [`SensorBounds`] and keeps each
//! ladle's temperature history consistent with its latest temperature. It has
//! no locking of its own; the monitor wraps it in a `tokio::sync::RwLock` so a
//! whole tick mutates it under a single write guard.

pub mod bounds;

pub use bounds::{round2, SensorBounds};

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::error::MonitorError;
use crate::types::{HistorySample, LadleReading, ReadingFields};

/// Readings for the whole fleet, keyed by ladle id.
#[derive(Debug, Clone)]
pub struct TelemetryStore {
    /// Fleet ids in configured order
    order: Vec<String>,
    readings: HashMap<String, LadleReading>,
    bounds: SensorBounds,
}

impl TelemetryStore {
    /// Build a store from initial readings. Values are clamped on the way in;
    /// a later reading with an already-seen id replaces the earlier one.
    pub fn new(bounds: SensorBounds, initial: Vec<LadleReading>) -> Self {
        let mut order = Vec::with_capacity(initial.len());
        let mut readings = HashMap::with_capacity(initial.len());
        for mut reading in initial {
            reading.temperature = bounds.clamp_temperature(reading.temperature);
            reading.stress = bounds.clamp_stress(reading.stress);
            reading.vibration = bounds.clamp_vibration(reading.vibration);
            if !readings.contains_key(&reading.id) {
                order.push(reading.id.clone());
            }
            readings.insert(reading.id.clone(), reading);
        }
        Self {
            order,
            readings,
            bounds,
        }
    }

    pub fn bounds(&self) -> &SensorBounds {
        &self.bounds
    }

    /// Ladle ids in fleet order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.readings.contains_key(id)
    }

    /// Copy of one ladle's reading.
    pub fn get(&self, id: &str) -> Result<LadleReading, MonitorError> {
        self.readings
            .get(id)
            .cloned()
            .ok_or_else(|| MonitorError::InvalidVesselId(id.to_string()))
    }

    /// Borrow one ladle's reading without copying.
    pub fn reading(&self, id: &str) -> Option<&LadleReading> {
        self.readings.get(id)
    }

    /// Readings in fleet order.
    pub fn iter(&self) -> impl Iterator<Item = &LadleReading> {
        self.order.iter().filter_map(|id| self.readings.get(id))
    }

    /// Copy of every reading, keyed by id.
    pub fn snapshot_all(&self) -> BTreeMap<String, LadleReading> {
        self.readings
            .iter()
            .map(|(id, reading)| (id.clone(), reading.clone()))
            .collect()
    }

    /// Chronological copy of one ladle's temperature history.
    pub fn history(&self, id: &str) -> Result<Vec<HistorySample>, MonitorError> {
        self.readings
            .get(id)
            .map(|r| r.history.to_vec())
            .ok_or_else(|| MonitorError::InvalidVesselId(id.to_string()))
    }

    /// Apply a partial update with clamping.
    ///
    /// A temperature write appends `(now, temperature)` to the history in the
    /// same call, so history never lags the current value.
    pub fn set(&mut self, id: &str, fields: &ReadingFields, now: DateTime<Utc>) -> Result<(), MonitorError> {
        let bounds = self.bounds;
        let reading = self
            .readings
            .get_mut(id)
            .ok_or_else(|| MonitorError::InvalidVesselId(id.to_string()))?;

        if let Some(stress) = fields.stress {
            reading.stress = bounds.clamp_stress(stress);
        }
        if let Some(vibration) = fields.vibration {
            reading.vibration = bounds.clamp_vibration(vibration);
        }
        if let Some(location) = fields.location {
            reading.location = location;
        }
        if let Some(temperature) = fields.temperature {
            reading.temperature = bounds.clamp_temperature(temperature);
            reading.history.push(now, f64::from(reading.temperature));
        }
        Ok(())
    }

    /// Append the current temperature to a ladle's history.
    pub fn record_sample(&mut self, id: &str, now: DateTime<Utc>) -> Result<(), MonitorError> {
        let reading = self
            .readings
            .get_mut(id)
            .ok_or_else(|| MonitorError::InvalidVesselId(id.to_string()))?;
        reading.history.push(now, f64::from(reading.temperature));
        Ok(())
    }
}
