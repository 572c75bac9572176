//! Static registry of the monitored parameters and their health bands.
//!
//! The catalog is pure data: ranges and units. Display strings and styling
//! belong to whatever renders the alerts.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::UnknownParameter;

// ---

/// Inclusive numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    // ---
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    // ---
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The eight monitored metrics, declared in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    AirTemperature,
    AirHumidity,
    SoilMoisture,
    SoilTemperature,
    SoilPh,
    NitrogenLevels,
    PhosphorusLevels,
    PotassiumLevels,
}

impl Parameter {
    // ---
    pub const ALL: [Parameter; 8] = [
        Parameter::AirTemperature,
        Parameter::AirHumidity,
        Parameter::SoilMoisture,
        Parameter::SoilTemperature,
        Parameter::SoilPh,
        Parameter::NitrogenLevels,
        Parameter::PhosphorusLevels,
        Parameter::PotassiumLevels,
    ];

    /// Column name used in the reading source.
    pub fn name(self) -> &'static str {
        // ---
        match self {
            Parameter::AirTemperature => "air_temperature",
            Parameter::AirHumidity => "air_humidity",
            Parameter::SoilMoisture => "soil_moisture",
            Parameter::SoilTemperature => "soil_temperature",
            Parameter::SoilPh => "soil_ph",
            Parameter::NitrogenLevels => "nitrogen_levels",
            Parameter::PhosphorusLevels => "phosphorus_levels",
            Parameter::PotassiumLevels => "potassium_levels",
        }
    }

    /// Catalog entry for this parameter. Infallible since every variant is registered.
    pub fn spec(self) -> &'static ParameterSpec {
        &CATALOG[self as usize]
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        Parameter::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownParameter(s.to_string()))
    }
}

/// Health bands for one parameter.
///
/// Invariant: `tolerable.min <= optimal.min <= optimal.max <= tolerable.max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec {
    // ---
    pub parameter: Parameter,
    /// Empty for dimensionless quantities (pH).
    pub unit: &'static str,
    pub optimal: ValueRange,
    pub tolerable: ValueRange,
}

/// Indexed by `Parameter as usize`.
pub static CATALOG: [ParameterSpec; 8] = [
    ParameterSpec {
        parameter: Parameter::AirTemperature,
        unit: "°C",
        optimal: ValueRange::new(21.0, 25.0),
        tolerable: ValueRange::new(4.0, 35.0),
    },
    ParameterSpec {
        parameter: Parameter::AirHumidity,
        unit: "%",
        optimal: ValueRange::new(40.0, 70.0),
        tolerable: ValueRange::new(20.0, 85.0),
    },
    ParameterSpec {
        parameter: Parameter::SoilMoisture,
        unit: "%",
        optimal: ValueRange::new(50.0, 70.0),
        tolerable: ValueRange::new(15.0, 80.0),
    },
    ParameterSpec {
        parameter: Parameter::SoilTemperature,
        unit: "°C",
        optimal: ValueRange::new(12.0, 25.0),
        tolerable: ValueRange::new(4.0, 30.0),
    },
    ParameterSpec {
        parameter: Parameter::SoilPh,
        unit: "",
        optimal: ValueRange::new(6.0, 7.0),
        tolerable: ValueRange::new(5.5, 8.0),
    },
    ParameterSpec {
        parameter: Parameter::NitrogenLevels,
        unit: "mg/kg",
        optimal: ValueRange::new(20.0, 40.0),
        tolerable: ValueRange::new(20.0, 40.0),
    },
    ParameterSpec {
        parameter: Parameter::PhosphorusLevels,
        unit: "mg/kg",
        optimal: ValueRange::new(10.0, 20.0),
        tolerable: ValueRange::new(10.0, 20.0),
    },
    ParameterSpec {
        parameter: Parameter::PotassiumLevels,
        unit: "mg/kg",
        optimal: ValueRange::new(150.0, 300.0),
        tolerable: ValueRange::new(150.0, 300.0),
    },
];

/// Look up a parameter's bands by its column name.
pub fn spec_for(name: &str) -> Result<&'static ParameterSpec, UnknownParameter> {
    // ---
    name.parse::<Parameter>().map(Parameter::spec)
}
