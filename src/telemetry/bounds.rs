//! Sensor saturation limits.
//!
//! Out-of-range values are clipped to the nearest bound, never rejected.

use serde::{Deserialize, Serialize};

use crate::config::BoundsConfig;

/// Round to two decimal places (vibration resolution).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Inclusive bounds for every numeric reading field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorBounds {
    pub temperature: (i32, i32),
    pub stress: (i32, i32),
    pub vibration: (f64, f64),
}

impl SensorBounds {
    pub fn from_config(config: &BoundsConfig) -> Self {
        Self {
            temperature: (config.temperature_min, config.temperature_max),
            stress: (config.stress_min, config.stress_max),
            vibration: (config.vibration_min, config.vibration_max),
        }
    }

    pub fn clamp_temperature(&self, value: i32) -> i32 {
        value.max(self.temperature.0).min(self.temperature.1)
    }

    pub fn clamp_stress(&self, value: i32) -> i32 {
        value.max(self.stress.0).min(self.stress.1)
    }

    /// Clamp a real-valued history temperature. NaN saturates to the lower bound.
    pub fn clamp_history_temperature(&self, value: f64) -> f64 {
        let (low, high) = (f64::from(self.temperature.0), f64::from(self.temperature.1));
        if value.is_nan() {
            return low;
        }
        value.max(low).min(high)
    }

    /// Clamp and round to two decimals. NaN saturates to the lower bound.
    pub fn clamp_vibration(&self, value: f64) -> f64 {
        let (low, high) = self.vibration;
        if value.is_nan() {
            return low;
        }
        // Rounding can step just outside a bound that is not on the 0.01 grid
        round2(value.max(low).min(high)).max(low).min(high)
    }

    pub fn contains(&self, temperature: i32, stress: i32, vibration: f64) -> bool {
        (self.temperature.0..=self.temperature.1).contains(&temperature)
            && (self.stress.0..=self.stress.1).contains(&stress)
            && (self.vibration.0..=self.vibration.1).contains(&vibration)
    }
}

impl Default for SensorBounds {
    fn default() -> Self {
        Self::from_config(&BoundsConfig::default())
    }
}
