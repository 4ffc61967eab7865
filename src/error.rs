//! Monitor error type

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// Lookup by an id that is not part of the configured fleet.
    #[error("Unknown ladle id: {0}")]
    InvalidVesselId(String),

    /// Rejected configuration. Raised at construction, before any tick runs.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}
