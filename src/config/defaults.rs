//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery. Every value here can be
//! overridden from `ladle_monitor.toml` unless noted otherwise.

// ============================================================================
// Fleet
// ============================================================================

/// Ladles tracked when no fleet is configured.
pub const DEFAULT_LADLE_IDS: [&str; 6] = ["L-01", "L-02", "L-03", "L-04", "L-05", "L-06"];

// ============================================================================
// Sensor Bounds
// ============================================================================

/// Steel temperature saturation limits (°C).
pub const TEMPERATURE_MIN: i32 = 1400;
pub const TEMPERATURE_MAX: i32 = 1700;

/// Mechanical stress index limits.
pub const STRESS_MIN: i32 = 30;
pub const STRESS_MAX: i32 = 95;

/// Vibration level limits.
pub const VIBRATION_MIN: f64 = 0.1;
pub const VIBRATION_MAX: f64 = 1.0;

// ============================================================================
// Simulation
// ============================================================================

/// Maximum temperature change per tick (°C, symmetric).
pub const TEMPERATURE_STEP: i32 = 8;

/// Maximum stress change per tick (symmetric).
pub const STRESS_STEP: i32 = 3;

/// Maximum vibration change per tick (symmetric).
pub const VIBRATION_STEP: f64 = 0.05;

/// Chance per tick that a ladle is moved to a random zone.
pub const RELOCATION_PROBABILITY: f64 = 0.15;

/// Temperature history ring-buffer capacity (samples).
///
/// 30 samples at 3 s = 90 s of trend.
pub const HISTORY_CAPACITY: usize = 30;

// ============================================================================
// Fleet Seeding (not configurable)
// ============================================================================

/// Centre of the seeded temperature range (°C).
pub const SEED_TEMPERATURE_BASE: i32 = 1500;

/// Seeded temperature spread around the base: `[base - spread, base + spread)`.
pub const SEED_TEMPERATURE_SPREAD: i32 = 30;

/// Seeded stress range (half-open).
pub const SEED_STRESS_RANGE: (i32, i32) = (50, 70);

/// Seeded vibration range (half-open).
pub const SEED_VIBRATION_RANGE: (f64, f64) = (0.3, 0.5);

/// Number of backdated history samples written at startup.
pub const SEED_HISTORY_SAMPLES: usize = 10;

/// Spacing between backdated history samples (seconds).
pub const SEED_HISTORY_SPACING_SECS: i64 = 3;

// ============================================================================
// Monitoring Loop
// ============================================================================

/// Tick period (milliseconds).
pub const MONITOR_INTERVAL_MS: u64 = 3_000;

/// Alert log capacity (entries).
pub const ALERT_CAPACITY: usize = 200;

/// Alerts returned by the API when no limit is given.
pub const ALERT_QUERY_DEFAULT_LIMIT: usize = 10;

// ============================================================================
// Server
// ============================================================================

/// HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:8080";
