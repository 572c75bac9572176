//! Per-reading alert aggregation.
//!
//! Runs the condition classifier over every catalog parameter and the pest
//! detector over the motion flag. Output is structured verdicts only;
//! wording and styling are left to the consumer.

use serde::Serialize;

use crate::catalog::{Parameter, ValueRange};
use crate::classifier::{self, Severity};
use crate::models::SensorReading;
use crate::pest::{self, PestVerdict};

// ---

/// One non-optimal parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionAlert {
    // ---
    pub parameter: Parameter,
    pub value: f64,
    pub unit: &'static str,
    pub severity: Severity,
    pub optimal_range: ValueRange,
    pub tolerable_range: ValueRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PestAlert {
    pub severity: PestVerdict,
}

/// Verdicts for a single reading. Recomputed per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertReport {
    // ---
    /// Non-optimal parameters in canonical column order.
    pub conditions: Vec<ConditionAlert>,
    pub pest: PestAlert,
}

impl AlertReport {
    // ---
    /// No condition alerts and no movement.
    pub fn is_nominal(&self) -> bool {
        self.conditions.is_empty() && self.pest.severity == PestVerdict::Safe
    }

    /// Worst condition severity, if any parameter is outside its optimal band.
    pub fn highest_severity(&self) -> Option<Severity> {
        self.conditions.iter().map(|c| c.severity).max()
    }
}

/// Classify every parameter of `reading` and its motion flag.
pub fn build_report(reading: &SensorReading) -> AlertReport {
    // ---
    let conditions = Parameter::ALL
        .into_iter()
        .filter_map(|parameter| {
            let spec = parameter.spec();
            let value = reading.value(parameter);
            classifier::classify(value, spec)
                .severity()
                .map(|severity| ConditionAlert {
                    parameter,
                    value,
                    unit: spec.unit,
                    severity,
                    optimal_range: spec.optimal,
                    tolerable_range: spec.tolerable,
                })
        })
        .collect();

    AlertReport {
        conditions,
        pest: PestAlert {
            severity: pest::classify(reading.motion_detected),
        },
    }
}
