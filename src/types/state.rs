//! Core state types: PlantZone, HealthStatus

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// Plant Zones
// ============================================================================

/// Plant zone a ladle can occupy.
///
/// The set is fixed; the simulator relocates ladles between these zones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlantZone {
    #[serde(rename = "TLC Pit")]
    TlcPit,
    #[serde(rename = "Converter Bay")]
    ConverterBay,
    #[serde(rename = "LF-1")]
    Lf1,
    #[serde(rename = "LF-2")]
    Lf2,
    #[serde(rename = "RH")]
    Rh,
    #[serde(rename = "Twin LF")]
    TwinLf,
    #[serde(rename = "Caster")]
    Caster,
}

impl PlantZone {
    /// Every zone, in plant layout order.
    pub const ALL: [PlantZone; 7] = [
        PlantZone::TlcPit,
        PlantZone::ConverterBay,
        PlantZone::Lf1,
        PlantZone::Lf2,
        PlantZone::Rh,
        PlantZone::TwinLf,
        PlantZone::Caster,
    ];

    /// Human-readable zone name as shown on plant signage
    pub fn display_name(&self) -> &'static str {
        match self {
            PlantZone::TlcPit => "TLC Pit",
            PlantZone::ConverterBay => "Converter Bay",
            PlantZone::Lf1 => "LF-1",
            PlantZone::Lf2 => "LF-2",
            PlantZone::Rh => "RH",
            PlantZone::TwinLf => "Twin LF",
            PlantZone::Caster => "Caster",
        }
    }

    /// Pick a zone uniformly at random. May return the current zone.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&PlantZone::TlcPit)
    }
}

impl std::fmt::Display for PlantZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Health Status
// ============================================================================

/// Three-level health status produced by the classifier.
///
/// Ordered by severity so `max()` over a fleet yields the worst status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum HealthStatus {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Normal => write!(f, "Normal"),
            HealthStatus::Warning => write!(f, "Warning"),
            HealthStatus::Critical => write!(f, "Critical"),
        }
    }
}
