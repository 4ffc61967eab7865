//! Shared data structures for ladle tracking and health monitoring
//!
//! This module defines the core types flowing through the monitoring pipeline:
//! - State: PlantZone (where a ladle is), HealthStatus (what the classifier says)
//! - Reading: LadleReading, HistorySample, LadleOverride (telemetry store contents)
//! - Analysis: Issue, Analysis (health classifier output)
//! - Alert: AlertEntry (alert log contents)

mod state;
mod reading;
mod analysis;
mod alert;

pub use state::*;
pub use reading::*;
pub use analysis::*;
pub use alert::*;
