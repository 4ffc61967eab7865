//! Ladle Monitor: smart ladle tracking and health monitoring
//!
//! A simulated fleet of steelmaking ladles moves through plant zones while
//! their temperature, stress and vibration readings drift. Every tick the
//! fleet is classified against fixed thresholds and critical ladles are
//! recorded in a bounded alert log.
//!
//! ## Architecture
//!
//! - **Telemetry Store** (`telemetry`): clamped readings plus temperature history
//! - **Simulation Stepper** (`simulation`): seeded random walk and overrides
//! - **Health Classifier** (`health`): ordered threshold rule table
//! - **Monitoring Loop** (`pipeline`): periodic tick, lock discipline, loop control
//! - **Alert Log** (`alerts`): most-recent-first bounded history
//! - **REST API** (`api`): Axum adapter over the monitor

pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod pipeline;
pub mod simulation;
pub mod telemetry;
pub mod types;

pub use config::{ConfigError, MonitorConfig};
pub use error::MonitorError;
pub use pipeline::{LadleMonitor, MonitorStats, StatusCounts};
pub use types::{
    AlertEntry, Analysis, HealthStatus, HistorySample, Issue, LadleOverride, LadleReading, PlantZone,
    ReadingFields,
};
