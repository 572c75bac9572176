//! Three-tier condition classification against a parameter's health bands.

use serde::Serialize;

use crate::catalog::ParameterSpec;

// ---

/// Outcome of classifying one metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    Optimal,
    Tolerable,
    Abnormal,
}

/// Alert-worthy subset of [`Condition`]; `Optimal` produces no alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Inside the tolerable band but outside optimal (warning).
    Tolerable,
    /// Outside the tolerable band (blocking).
    Abnormal,
}

impl Condition {
    // ---
    pub fn severity(self) -> Option<Severity> {
        match self {
            Condition::Optimal => None,
            Condition::Tolerable => Some(Severity::Tolerable),
            Condition::Abnormal => Some(Severity::Abnormal),
        }
    }
}

/// Classify `value` against `spec`.
///
/// The tolerable band is checked first, so a value outside it is `Abnormal`
/// even though it is also outside the optimal band. Both bounds of each band
/// are inclusive. Callers pass finite values; the reading store rejects
/// `NaN` and infinities at load time.
pub fn classify(value: f64, spec: &ParameterSpec) -> Condition {
    // ---
    if value < spec.tolerable.min || value > spec.tolerable.max {
        Condition::Abnormal
    } else if value < spec.optimal.min || value > spec.optimal.max {
        Condition::Tolerable
    } else {
        Condition::Optimal
    }
}
