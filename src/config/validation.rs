//! Config validation: unknown-key detection with Levenshtein suggestions
//! and plant range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use crate::health::rules;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for MonitorConfig.
///
/// Maintained by hand to match the struct hierarchy in monitor_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [fleet]
        "fleet",
        "fleet.ladle_ids",
        // [bounds]
        "bounds",
        "bounds.temperature_min",
        "bounds.temperature_max",
        "bounds.stress_min",
        "bounds.stress_max",
        "bounds.vibration_min",
        "bounds.vibration_max",
        // [simulation]
        "simulation",
        "simulation.temperature_step",
        "simulation.stress_step",
        "simulation.vibration_step",
        "simulation.relocation_probability",
        "simulation.history_capacity",
        "simulation.seed",
        // [monitor]
        "monitor",
        "monitor.interval_ms",
        "monitor.alert_capacity",
        "monitor.autostart",
        // [server]
        "server",
        "server.addr",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut candidates: Vec<&str> = known.iter().copied().collect();
    candidates.sort_unstable();
    candidates
        .into_iter()
        .map(|k| (k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are reported by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Plant Range Validation
// ============================================================================

/// Validate plant ranges on a parsed MonitorConfig.
///
/// Returns (errors, warnings). Errors are values that make the monitor
/// meaningless and must prevent startup; warnings flag bounds under which some
/// health rule can never fire.
pub fn validate_physical_ranges(
    config: &super::MonitorConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let b = &config.bounds;

    // Vibration is a non-negative level
    if b.vibration_min < 0.0 {
        errors.push(format!(
            "bounds.vibration_min = {:.2} cannot be negative",
            b.vibration_min
        ));
    }

    // Stress is a non-negative index
    if b.stress_min < 0 {
        errors.push(format!("bounds.stress_min = {} cannot be negative", b.stress_min));
    }

    // Upper bounds at or below a critical limit make that rule unreachable
    let unreachable = [
        (
            "bounds.temperature_max",
            b.temperature_max <= rules::TEMPERATURE_CRITICAL_ABOVE,
            "Overheating",
        ),
        (
            "bounds.stress_max",
            b.stress_max <= rules::STRESS_CRITICAL_ABOVE,
            "High Stress (crack risk)",
        ),
        (
            "bounds.vibration_max",
            b.vibration_max <= rules::VIBRATION_CRITICAL_ABOVE,
            "Vibration Anomaly",
        ),
    ];
    for (field, hit, label) in unreachable {
        if hit {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!("{field} keeps readings below the '{label}' limit; that rule can never trigger"),
                suggestion: None,
            });
        }
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
