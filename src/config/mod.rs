//! Monitor Configuration Module
//!
//! Fleet, sensor bounds, simulation and loop settings loaded from TOML, with
//! built-in defaults matching the plant prototype.
//!
//! ## Loading Order
//!
//! 1. `LADLE_CONFIG` environment variable (path to TOML file)
//! 2. `ladle_monitor.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! let config = MonitorConfig::load()?;
//! let monitor = LadleMonitor::new(&config)?;
//! ```
//!
//! The config is passed explicitly to constructors; there is no global copy.

mod monitor_config;
pub mod defaults;
pub mod validation;

pub use monitor_config::*;
