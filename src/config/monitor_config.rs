//! Monitor Configuration - fleet, bounds, simulation and loop settings as TOML
//!
//! Each struct implements `Default` with the values from [`super::defaults`],
//! so a missing file or a partial file behaves exactly like the built-in setup.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;

/// Environment variable holding an explicit config path.
pub const CONFIG_ENV_VAR: &str = "LADLE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "ladle_monitor.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a monitoring instance.
///
/// Load with `MonitorConfig::load()` which searches:
/// 1. `$LADLE_CONFIG` env var
/// 2. `./ladle_monitor.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// Ladles tracked by this instance
    #[serde(default)]
    pub fleet: FleetConfig,

    /// Physical saturation limits for every sensor write
    #[serde(default)]
    pub bounds: BoundsConfig,

    /// Random-walk simulator tuning
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Monitoring loop timing and alert retention
    #[serde(default)]
    pub monitor: LoopConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl MonitorConfig {
    /// Load configuration using the standard search order:
    /// 1. `$LADLE_CONFIG` environment variable
    /// 2. `./ladle_monitor.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that exists but fails to parse or validate is reported as an
    /// error rather than silently replaced by defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                let config = Self::load_from_file(&p)?;
                info!(path = %p.display(), ladles = config.fleet.ladle_ids.len(), "Loaded monitor config from LADLE_CONFIG");
                return Ok(config);
            }
            warn!(path = %path, "LADLE_CONFIG points to non-existent file, falling back");
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            let config = Self::load_from_file(&local)?;
            info!(ladles = config.fleet.ladle_ids.len(), "Loaded monitor config from ./ladle_monitor.toml");
            return Ok(config);
        }

        info!("No ladle_monitor.toml found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Two passes: unknown keys are logged as warnings (with a suggestion when
    /// one is close), then the typed config is deserialized and validated.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the whole config, collecting every problem before failing.
    ///
    /// Rules:
    /// - The fleet must be non-empty with unique, non-blank ids
    /// - Every bound must satisfy min < max with finite values
    /// - Step sizes must be non-negative, the relocation probability in [0, 1]
    /// - History capacity, alert capacity and tick interval must be > 0
    /// - The server address must parse as `HOST:PORT`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        // Fleet
        let ids = &self.fleet.ladle_ids;
        if ids.is_empty() {
            errors.push("fleet.ladle_ids must list at least one ladle".to_string());
        }
        let mut seen = HashSet::new();
        for id in ids {
            if id.trim().is_empty() {
                errors.push("fleet.ladle_ids contains a blank id".to_string());
            } else if !seen.insert(id.as_str()) {
                errors.push(format!("fleet.ladle_ids contains duplicate id '{id}'"));
            }
        }

        // Bounds
        let b = &self.bounds;
        if b.temperature_min >= b.temperature_max {
            errors.push(format!(
                "bounds.temperature_min ({}) must be less than temperature_max ({})",
                b.temperature_min, b.temperature_max
            ));
        }
        if b.stress_min >= b.stress_max {
            errors.push(format!(
                "bounds.stress_min ({}) must be less than stress_max ({})",
                b.stress_min, b.stress_max
            ));
        }
        Self::check_float_range(b.vibration_min, b.vibration_max, "bounds.vibration", &mut errors);

        // Simulation
        let s = &self.simulation;
        if s.temperature_step < 0 {
            errors.push(format!("simulation.temperature_step ({}) must be >= 0", s.temperature_step));
        }
        if s.stress_step < 0 {
            errors.push(format!("simulation.stress_step ({}) must be >= 0", s.stress_step));
        }
        if !s.vibration_step.is_finite() || s.vibration_step < 0.0 {
            errors.push(format!("simulation.vibration_step ({}) must be a finite value >= 0", s.vibration_step));
        }
        if !(0.0..=1.0).contains(&s.relocation_probability) {
            errors.push(format!(
                "simulation.relocation_probability ({}) must be within [0, 1]",
                s.relocation_probability
            ));
        }
        if s.history_capacity == 0 {
            errors.push("simulation.history_capacity must be > 0".to_string());
        }

        // Loop
        if self.monitor.interval_ms == 0 {
            errors.push("monitor.interval_ms must be > 0".to_string());
        }
        if self.monitor.alert_capacity == 0 {
            errors.push("monitor.alert_capacity must be > 0".to_string());
        }

        // Server
        if self.server.addr.parse::<SocketAddr>().is_err() {
            errors.push(format!("server.addr '{}' is not a valid HOST:PORT address", self.server.addr));
        }

        // Plant range checks
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_float_range(min: f64, max: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, so catch them explicitly
        if !min.is_finite() || !max.is_finite() {
            errors.push(format!("{name}: values must be finite (got min={min}, max={max})"));
            return;
        }
        if min >= max {
            errors.push(format!("{name}_min ({min}) must be less than {name}_max ({max})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse error ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Fleet
// ============================================================================

/// Identifiers of the ladles tracked by this instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetConfig {
    #[serde(default = "default_ladle_ids")]
    pub ladle_ids: Vec<String>,
}

fn default_ladle_ids() -> Vec<String> {
    defaults::DEFAULT_LADLE_IDS.iter().map(|id| (*id).to_string()).collect()
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            ladle_ids: default_ladle_ids(),
        }
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Saturation limits applied to every sensor write (simulated or manual).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundsConfig {
    #[serde(default = "default_temperature_min")]
    pub temperature_min: i32,
    #[serde(default = "default_temperature_max")]
    pub temperature_max: i32,
    #[serde(default = "default_stress_min")]
    pub stress_min: i32,
    #[serde(default = "default_stress_max")]
    pub stress_max: i32,
    #[serde(default = "default_vibration_min")]
    pub vibration_min: f64,
    #[serde(default = "default_vibration_max")]
    pub vibration_max: f64,
}

fn default_temperature_min() -> i32 { defaults::TEMPERATURE_MIN }
fn default_temperature_max() -> i32 { defaults::TEMPERATURE_MAX }
fn default_stress_min() -> i32 { defaults::STRESS_MIN }
fn default_stress_max() -> i32 { defaults::STRESS_MAX }
fn default_vibration_min() -> f64 { defaults::VIBRATION_MIN }
fn default_vibration_max() -> f64 { defaults::VIBRATION_MAX }

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            temperature_min: default_temperature_min(),
            temperature_max: default_temperature_max(),
            stress_min: default_stress_min(),
            stress_max: default_stress_max(),
            vibration_min: default_vibration_min(),
            vibration_max: default_vibration_max(),
        }
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// Random-walk widths, relocation chance and history sizing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Temperature delta drawn from `[-step, step]` each tick
    #[serde(default = "default_temperature_step")]
    pub temperature_step: i32,

    /// Stress delta drawn from `[-step, step]` each tick
    #[serde(default = "default_stress_step")]
    pub stress_step: i32,

    /// Vibration delta drawn from `[-step, step]` each tick
    #[serde(default = "default_vibration_step")]
    pub vibration_step: f64,

    /// Per-tick chance of moving a ladle to a random zone
    #[serde(default = "default_relocation_probability")]
    pub relocation_probability: f64,

    /// Temperature samples kept per ladle
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Fixed RNG seed for reproducible runs; entropy when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_temperature_step() -> i32 { defaults::TEMPERATURE_STEP }
fn default_stress_step() -> i32 { defaults::STRESS_STEP }
fn default_vibration_step() -> f64 { defaults::VIBRATION_STEP }
fn default_relocation_probability() -> f64 { defaults::RELOCATION_PROBABILITY }
fn default_history_capacity() -> usize { defaults::HISTORY_CAPACITY }

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            temperature_step: default_temperature_step(),
            stress_step: default_stress_step(),
            vibration_step: default_vibration_step(),
            relocation_probability: default_relocation_probability(),
            history_capacity: default_history_capacity(),
            seed: None,
        }
    }
}

// ============================================================================
// Monitoring Loop
// ============================================================================

/// Tick period, alert retention and startup behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoopConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_alert_capacity")]
    pub alert_capacity: usize,

    /// Start ticking as soon as the process is up
    #[serde(default = "default_autostart")]
    pub autostart: bool,
}

fn default_interval_ms() -> u64 { defaults::MONITOR_INTERVAL_MS }
fn default_alert_capacity() -> usize { defaults::ALERT_CAPACITY }
fn default_autostart() -> bool { true }

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            alert_capacity: default_alert_capacity(),
            autostart: default_autostart(),
        }
    }
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}
