//! Simulation Stepper - synthetic telemetry for the ladle fleet
//!
//! Each tick every ladle takes one bounded random-walk step and may be moved
//! to another plant zone. An optional operator override is applied after the
//! walk so its values are what the next classification sees.

use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;
use rand_distr::StandardNormal;
use tracing::{debug, warn};

use crate::config::{defaults, SimulationConfig};
use crate::telemetry::{round2, SensorBounds, TelemetryStore};
use crate::types::{LadleOverride, LadleReading, PlantZone, ReadingFields, TemperatureHistory};

/// Result of one stepper pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Ladles advanced by the random walk
    pub stepped: usize,
    /// Ladles moved to a different zone this step
    pub relocated: usize,
    /// Whether a supplied override matched a ladle
    pub override_applied: bool,
}

/// Owns the RNG and the walk parameters.
#[derive(Debug)]
pub struct Stepper {
    rng: StdRng,
    temperature_step: i32,
    stress_step: i32,
    vibration_step: f64,
    relocation_probability: f64,
    history_capacity: usize,
}

impl Stepper {
    pub fn new(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            temperature_step: config.temperature_step.abs(),
            stress_step: config.stress_step.abs(),
            vibration_step: config.vibration_step.abs(),
            relocation_probability: config.relocation_probability.clamp(0.0, 1.0),
            history_capacity: config.history_capacity,
        }
    }

    // ========================================================================
    // Fleet seeding
    // ========================================================================

    /// Build the initial store: plausible mid-range readings plus a short
    /// backdated history so trend charts are populated from the first tick.
    pub fn seed_fleet(&mut self, ids: &[String], bounds: SensorBounds, now: DateTime<Utc>) -> TelemetryStore {
        let readings = ids.iter().map(|id| self.seed_reading(id, &bounds, now)).collect();
        TelemetryStore::new(bounds, readings)
    }

    fn seed_reading(&mut self, id: &str, bounds: &SensorBounds, now: DateTime<Utc>) -> LadleReading {
        let spread = defaults::SEED_TEMPERATURE_SPREAD;
        let temperature =
            bounds.clamp_temperature(defaults::SEED_TEMPERATURE_BASE + self.rng.gen_range(-spread..spread));
        let (stress_lo, stress_hi) = defaults::SEED_STRESS_RANGE;
        let stress = self.rng.gen_range(stress_lo..stress_hi);
        let (vib_lo, vib_hi) = defaults::SEED_VIBRATION_RANGE;
        let vibration = round2(self.rng.gen_range(vib_lo..vib_hi));
        let location = PlantZone::random(&mut self.rng);

        let mut history = TemperatureHistory::new(self.history_capacity);
        let samples = defaults::SEED_HISTORY_SAMPLES;
        for i in 0..samples {
            let age_secs = (samples - i) as i64 * defaults::SEED_HISTORY_SPACING_SECS;
            let jitter: f64 = self.rng.sample(StandardNormal);
            let sample = bounds.clamp_history_temperature(f64::from(temperature) + jitter);
            history.push(now - Duration::seconds(age_secs), sample);
        }

        LadleReading {
            id: id.to_string(),
            temperature,
            stress,
            vibration,
            location,
            history,
        }
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance every ladle by one step, then apply `override_` if given.
    ///
    /// An override for an id outside the fleet is ignored.
    pub fn step(
        &mut self,
        store: &mut TelemetryStore,
        override_: Option<&LadleOverride>,
        now: DateTime<Utc>,
    ) -> StepOutcome {
        let mut outcome = StepOutcome {
            stepped: 0,
            relocated: 0,
            override_applied: false,
        };

        let ids = store.ids().to_vec();
        for id in &ids {
            let Some(current) = store.reading(id) else {
                continue;
            };
            let fields = self.walk(current);
            if fields.location.is_some_and(|zone| zone != current.location) {
                outcome.relocated += 1;
            }
            if store.set(id, &fields, now).is_ok() {
                outcome.stepped += 1;
            }
            debug_assert!(store
                .reading(id)
                .is_some_and(|r| store.bounds().contains(r.temperature, r.stress, r.vibration)));
        }

        if let Some(ov) = override_ {
            outcome.override_applied = apply_override(store, ov, now);
        }

        debug!(
            stepped = outcome.stepped,
            relocated = outcome.relocated,
            override_applied = outcome.override_applied,
            "Simulation step complete"
        );
        outcome
    }

    /// Draw the next values for one ladle. Clamping happens in the store.
    fn walk(&mut self, current: &LadleReading) -> ReadingFields {
        let t_step = self.temperature_step;
        let s_step = self.stress_step;
        let v_step = self.vibration_step;

        let mut fields = ReadingFields::default()
            .with_temperature(current.temperature.saturating_add(self.rng.gen_range(-t_step..=t_step)))
            .with_stress(current.stress.saturating_add(self.rng.gen_range(-s_step..=s_step)))
            .with_vibration(current.vibration + self.rng.gen_range(-v_step..=v_step));

        if self.rng.gen_bool(self.relocation_probability) {
            fields = fields.with_location(PlantZone::random(&mut self.rng));
        }
        fields
    }
}

/// Overwrite the named fields of one ladle. A fresh history sample is always
/// appended so the override shows up in the trend even without a temperature.
fn apply_override(store: &mut TelemetryStore, ov: &LadleOverride, now: DateTime<Utc>) -> bool {
    if store.set(&ov.ladle_id, &ov.fields, now).is_err() {
        warn!(ladle_id = %ov.ladle_id, "Override ignored: ladle not in fleet");
        return false;
    }
    if ov.fields.temperature.is_none() {
        let _ = store.record_sample(&ov.ladle_id, now);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Stepper {
        Stepper::new(&SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        })
    }

    fn fleet(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("L-{i:02}")).collect()
    }

    #[test]
    fn test_seed_fleet_ranges() {
        let mut stepper = seeded(7);
        let store = stepper.seed_fleet(&fleet(6), SensorBounds::default(), Utc::now());

        assert_eq!(store.len(), 6);
        for r in store.iter() {
            assert!((1470..1530).contains(&r.temperature), "temperature {}", r.temperature);
            assert!((50..70).contains(&r.stress));
            assert!((0.3..=0.5).contains(&r.vibration));
            assert_eq!(r.vibration, round2(r.vibration));
            assert_eq!(r.history.len(), 10);
        }
    }

    #[test]
    fn test_seeded_history_respects_narrow_bounds() {
        let bounds = SensorBounds {
            temperature: (1400, 1450),
            ..SensorBounds::default()
        };
        let mut stepper = seeded(1);
        let store = stepper.seed_fleet(&fleet(6), bounds, Utc::now());

        for r in store.iter() {
            assert_eq!(r.temperature, 1450);
            for sample in r.history.iter() {
                assert!(sample.temperature <= 1450.0, "{} sample {}", r.id, sample.temperature);
                assert!(sample.temperature >= 1400.0);
            }
        }
    }

    #[test]
    fn test_seeded_history_is_backdated_and_ordered() {
        let now = Utc::now();
        let mut stepper = seeded(11);
        let store = stepper.seed_fleet(&fleet(1), SensorBounds::default(), now);
        let history = store.history("L-01").unwrap();

        assert_eq!(history[0].timestamp, now - Duration::seconds(30));
        assert_eq!(history[9].timestamp, now - Duration::seconds(3));
        assert!(history.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_same_seed_same_walk() {
        let now = Utc::now();
        let mut a = seeded(42);
        let mut b = seeded(42);
        let mut store_a = a.seed_fleet(&fleet(4), SensorBounds::default(), now);
        let mut store_b = b.seed_fleet(&fleet(4), SensorBounds::default(), now);

        for i in 1..=20 {
            let t = now + Duration::seconds(i);
            a.step(&mut store_a, None, t);
            b.step(&mut store_b, None, t);
        }
        assert_eq!(store_a.snapshot_all(), store_b.snapshot_all());
    }

    #[test]
    fn test_walk_stays_within_bounds() {
        let now = Utc::now();
        let mut stepper = Stepper::new(&SimulationConfig {
            temperature_step: 120,
            stress_step: 40,
            vibration_step: 0.5,
            relocation_probability: 1.0,
            seed: Some(3),
            ..SimulationConfig::default()
        });
        let bounds = SensorBounds::default();
        let mut store = stepper.seed_fleet(&fleet(6), bounds, now);

        for i in 1..=200 {
            stepper.step(&mut store, None, now + Duration::seconds(i));
            for r in store.iter() {
                assert!(bounds.contains(r.temperature, r.stress, r.vibration), "{r:?}");
            }
        }
    }

    #[test]
    fn test_history_capped_after_many_steps() {
        let now = Utc::now();
        let mut stepper = seeded(5);
        let mut store = stepper.seed_fleet(&fleet(2), SensorBounds::default(), now);

        for i in 1..=100 {
            stepper.step(&mut store, None, now + Duration::seconds(i));
        }
        for id in store.ids() {
            let history = store.history(id).unwrap();
            assert_eq!(history.len(), defaults::HISTORY_CAPACITY);
            assert!(history.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
            let last = history.last().map(|s| s.temperature);
            assert_eq!(last, Some(f64::from(store.get(id).unwrap().temperature)));
        }
    }

    #[test]
    fn test_override_applied_after_walk() {
        let now = Utc::now();
        let mut stepper = seeded(9);
        let mut store = stepper.seed_fleet(&fleet(3), SensorBounds::default(), now);

        let ov = LadleOverride::forced_overheat("L-02");
        let outcome = stepper.step(&mut store, Some(&ov), now + Duration::seconds(3));

        assert!(outcome.override_applied);
        let r = store.get("L-02").unwrap();
        assert_eq!((r.temperature, r.stress, r.vibration), (1625, 86, 0.8));
        let history = store.history("L-02").unwrap();
        assert_eq!(history.last().map(|s| s.temperature), Some(1625.0));
        assert!(history.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_partial_override_keeps_other_fields() {
        let now = Utc::now();
        let mut stepper = Stepper::new(&SimulationConfig {
            temperature_step: 0,
            stress_step: 0,
            vibration_step: 0.0,
            relocation_probability: 0.0,
            seed: Some(1),
            ..SimulationConfig::default()
        });
        let mut store = stepper.seed_fleet(&fleet(1), SensorBounds::default(), now);
        let before = store.get("L-01").unwrap();

        let ov = LadleOverride::new("L-01", ReadingFields::default().with_stress(500));
        stepper.step(&mut store, Some(&ov), now + Duration::seconds(1));

        let after = store.get("L-01").unwrap();
        assert_eq!(after.stress, 95);
        assert_eq!(after.temperature, before.temperature);
        assert_eq!(after.location, before.location);
    }

    #[test]
    fn test_unknown_override_is_ignored() {
        let now = Utc::now();
        let mut stepper = seeded(13);
        let mut store = stepper.seed_fleet(&fleet(2), SensorBounds::default(), now);

        let ov = LadleOverride::forced_overheat("L-99");
        let outcome = stepper.step(&mut store, Some(&ov), now + Duration::seconds(3));

        assert!(!outcome.override_applied);
        assert_eq!(outcome.stepped, 2);
        assert!(!store.contains("L-99"));
        for r in store.iter() {
            assert_eq!(r.history.len(), 11);
        }
    }
}
